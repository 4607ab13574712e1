/// Lightbox overlay: header, current image with swipe surface, arrows and
/// the thumbnail strip
use iced::widget::{
    button, canvas, column, container, horizontal_space, image, mouse_area, row, stack, text,
    Row,
};
use iced::{Alignment, Color, ContentFit, Element, Length};

use crate::i18n::Translator;
use crate::media::cache::HandleCache;
use crate::media::delivery::{tier_url, ImageTier};
use crate::state::category::classify;
use crate::state::data::ProjectEntry;
use crate::state::lightbox::LightboxNavigator;
use crate::state::thumbnails::ThumbnailWindow;
use crate::ui::swipe::SwipeSurface;
use crate::Message;

const THUMB_SIZE: f32 = 64.0;

/// Layout inputs that depend on the window size
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    pub narrow: bool,
    pub max_thumbnails: usize,
}

/// Render the overlay. Returns `None` while the lightbox is closed.
pub fn view<'a>(
    lightbox: &'a LightboxNavigator,
    translator: &'a Translator,
    session_images: &'a HandleCache,
    shared_images: &'a HandleCache,
    viewport: Viewport,
) -> Option<Element<'a, Message>> {
    let project = lightbox.project()?;

    let content = column![
        header(project, lightbox.index(), translator),
        image_area(lightbox, project, translator, session_images, shared_images, viewport),
        thumbnail_strip(lightbox, project, shared_images, viewport),
    ]
    .spacing(12)
    .padding(if viewport.narrow { 8 } else { 20 });

    let panel = container(content)
        .max_width(if viewport.narrow { f32::INFINITY } else { 1100.0 })
        .style(container::rounded_box);

    // Clicks inside the panel are swallowed so only the backdrop closes
    let panel = mouse_area(panel).on_press(Message::Noop);

    let backdrop = container(panel)
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .style(|_theme| container::Style {
            background: Some(Color::from_rgba(0.0, 0.0, 0.0, 0.85).into()),
            ..container::Style::default()
        });

    Some(mouse_area(backdrop).on_press(Message::CloseLightbox).into())
}

fn header<'a>(project: &ProjectEntry, index: usize, translator: &Translator) -> Element<'a, Message> {
    let counter = if project.has_images() {
        format!("{} / {}", index + 1, project.image_count)
    } else {
        String::new()
    };
    let category = translator.t(classify(&project.folder).translation_key());

    row![
        column![
            text(translator.project_name(&project.name)).size(24),
            text(category).size(14),
            text(counter).size(14),
        ]
        .spacing(4),
        horizontal_space(),
        button(text(translator.t("lightbox.close")))
            .on_press(Message::CloseLightbox)
            .style(button::secondary),
    ]
    .align_y(Alignment::Center)
    .into()
}

fn image_area<'a>(
    lightbox: &LightboxNavigator,
    project: &ProjectEntry,
    translator: &Translator,
    session_images: &'a HandleCache,
    shared_images: &'a HandleCache,
    viewport: Viewport,
) -> Element<'a, Message> {
    let height = if viewport.narrow { 480.0 } else { 560.0 };

    let shown: Element<Message> = match lightbox.displayed_url() {
        None => centered(text(translator.t("lightbox.noPhoto")).size(18).into(), height),
        Some(url) => match session_images.get(url).or_else(|| shared_images.get(url)) {
            Some(handle) => image(handle.clone())
                .width(Length::Fill)
                .height(Length::Fixed(height))
                .content_fit(ContentFit::Contain)
                .into(),
            None if lightbox.is_image_loaded() => {
                // Image and fallback both unavailable
                centered(text(translator.t("lightbox.noPhoto")).size(18).into(), height)
            }
            None => centered(text(translator.t("lightbox.loading")).size(18).into(), height),
        },
    };

    let surface = canvas(SwipeSurface)
        .width(Length::Fill)
        .height(Length::Fixed(height));

    let mut layers = stack![shown, surface];

    if !lightbox.is_image_loaded() && lightbox.displayed_url().is_some() {
        layers = layers.push(
            container(text(translator.t("lightbox.loading")).size(14))
                .padding(8)
                .style(container::rounded_box),
        );
    }

    if viewport.narrow || project.image_count <= 1 {
        return layers.into();
    }

    // Desktop arrows
    row![
        button(text("‹").size(32))
            .on_press(Message::PreviousImage)
            .style(button::text),
        layers,
        button(text("›").size(32))
            .on_press(Message::NextImage)
            .style(button::text),
    ]
    .spacing(8)
    .align_y(Alignment::Center)
    .into()
}

fn thumbnail_strip<'a>(
    lightbox: &LightboxNavigator,
    project: &ProjectEntry,
    shared_images: &'a HandleCache,
    viewport: Viewport,
) -> Element<'a, Message> {
    if project.image_count <= 1 {
        return Row::new().into();
    }

    let current = lightbox.index();
    let window = ThumbnailWindow::compute(current, project.image_count, viewport.max_thumbnails);

    let thumbs = window.indices().map(|index| {
        let url = tier_url(&project.images[index].url, ImageTier::NavThumb);
        let face: Element<Message> = match shared_images.get(&url) {
            Some(handle) => image(handle.clone())
                .width(Length::Fixed(THUMB_SIZE))
                .height(Length::Fixed(THUMB_SIZE))
                .content_fit(ContentFit::Cover)
                .into(),
            None => container(text((index + 1).to_string()).size(12))
                .width(Length::Fixed(THUMB_SIZE))
                .height(Length::Fixed(THUMB_SIZE))
                .center_x(Length::Fixed(THUMB_SIZE))
                .center_y(Length::Fixed(THUMB_SIZE))
                .into(),
        };

        let style = if index == current {
            button::primary
        } else {
            button::secondary
        };

        Element::from(
            button(face)
                .on_press(Message::JumpTo(index))
                .padding(2)
                .style(style),
        )
    });

    let mut strip = Row::new().spacing(6).align_y(Alignment::Center);

    if window.has_more_left {
        strip = strip.push(button(text("‹")).on_press(Message::StepBack).style(button::text));
    }
    strip = strip.extend(thumbs);
    if window.has_more_right {
        strip = strip.push(button(text("›")).on_press(Message::StepForward).style(button::text));
    }

    container(strip).center_x(Length::Fill).into()
}

fn centered<'a>(content: Element<'a, Message>, height: f32) -> Element<'a, Message> {
    container(content)
        .width(Length::Fill)
        .height(Length::Fixed(height))
        .center_x(Length::Fill)
        .center_y(Length::Fixed(height))
        .into()
}
