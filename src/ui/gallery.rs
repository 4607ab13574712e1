/// Projects tab: filter chips, the current page of project cards and the
/// pagination bar
use iced::widget::{button, column, container, image, row, text, Column, Row};
use iced::{Alignment, ContentFit, Element, Length, Pixels};
use iced_aw::Wrap;

use crate::i18n::Translator;
use crate::media::cache::HandleCache;
use crate::state::category::Category;
use crate::state::data::ProjectEntry;
use crate::state::pager::{Direction, Filter, GalleryPager};
use crate::Message;

const CARD_WIDTH: f32 = 320.0;
const COVER_HEIGHT: f32 = 200.0;

pub fn view<'a>(
    pager: &'a GalleryPager,
    translator: &'a Translator,
    covers: &'a HandleCache,
) -> Element<'a, Message> {
    let header = column![
        text(translator.t("projects.title")).size(40),
        text(translator.t("projects.subtitle")).size(16),
    ]
    .spacing(8)
    .align_x(Alignment::Center);

    let items = pager.current_page_items();

    let body: Element<Message> = if items.is_empty() {
        container(text(translator.t("projects.empty")).size(18))
            .padding(40)
            .center_x(Length::Fill)
            .into()
    } else {
        let cards = items
            .into_iter()
            .map(|project| project_card(project, translator, covers))
            .collect();

        Wrap::with_elements(cards)
            .spacing(Pixels(16.0))
            .line_spacing(Pixels(16.0))
            .into()
    };

    column![header, filter_bar(pager, translator), body, pagination_bar(pager, translator)]
        .spacing(24)
        .padding(32)
        .align_x(Alignment::Center)
        .width(Length::Fill)
        .into()
}

fn filter_bar<'a>(pager: &GalleryPager, translator: &Translator) -> Element<'a, Message> {
    let active = pager.filter();

    let chip = |label: String, filter: Filter| {
        let style = if filter == active {
            button::primary
        } else {
            button::secondary
        };
        button(text(label).size(14))
            .on_press(Message::SetFilter(filter))
            .padding([6, 14])
            .style(style)
    };

    let chips = std::iter::once(chip(translator.t("projects.all"), Filter::All)).chain(
        Category::ALL
            .into_iter()
            .map(|category| chip(translator.t(category.translation_key()), Filter::Only(category))),
    );

    Row::with_children(chips.map(Element::from))
        .spacing(8)
        .into()
}

fn project_card<'a>(
    project: &'a ProjectEntry,
    translator: &Translator,
    covers: &'a HandleCache,
) -> Element<'a, Message> {
    let cover: Element<Message> = match covers.get(&project.cover_image) {
        Some(handle) => image(handle.clone())
            .width(Length::Fill)
            .height(Length::Fixed(COVER_HEIGHT))
            .content_fit(ContentFit::Cover)
            .into(),
        None => container(text(translator.t("lightbox.loading")).size(14))
            .width(Length::Fill)
            .height(Length::Fixed(COVER_HEIGHT))
            .center_x(Length::Fill)
            .center_y(Length::Fixed(COVER_HEIGHT))
            .into(),
    };

    let caption = column![
        text(translator.project_name(&project.name)).size(20),
        text(format!(
            "{} {}",
            project.image_count,
            translator.t("projects.photos")
        ))
        .size(14),
    ]
    .spacing(4)
    .padding(12);

    button(column![cover, caption])
        .on_press(Message::OpenProject(project.id))
        .width(Length::Fixed(CARD_WIDTH))
        .padding(0)
        .style(button::secondary)
        .into()
}

fn pagination_bar<'a>(pager: &GalleryPager, translator: &Translator) -> Element<'a, Message> {
    let total = pager.total_pages();
    if total <= 1 {
        return Column::new().into();
    }

    let current = pager.current_page();

    let previous = button(text(translator.t("projects.previousPage")))
        .on_press_maybe(
            pager
                .has_previous_page()
                .then(|| Message::GoToPage(current - 1, Direction::Backward)),
        )
        .style(button::secondary);

    let pages = (0..total).map(|index| {
        let direction = if index >= current {
            Direction::Forward
        } else {
            Direction::Backward
        };
        let style = if index == current {
            button::primary
        } else {
            button::secondary
        };
        Element::from(
            button(text((index + 1).to_string()))
                .on_press(Message::GoToPage(index, direction))
                .style(style),
        )
    });

    let next = button(text(translator.t("projects.nextPage")))
        .on_press_maybe(
            pager
                .has_next_page()
                .then(|| Message::GoToPage(current + 1, Direction::Forward)),
        )
        .style(button::secondary);

    row![previous, Row::with_children(pages).spacing(6), next]
        .spacing(12)
        .align_y(Alignment::Center)
        .into()
}
