/// Contact tab: the enquiry form and its submission banner
use iced::widget::{button, column, container, pick_list, row, text, text_input};
use iced::{Alignment, Element, Length};
use std::fmt;

use crate::contact::{ContactForm, Subject, SubmitStatus, COUNTRY_CODES};
use crate::i18n::Translator;
use crate::Message;

/// Dial code entry as shown in the picker, e.g. `TR +90`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DialCode {
    code: &'static str,
    country: &'static str,
}

impl fmt::Display for DialCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.country, self.code)
    }
}

/// Subject paired with its label in the current language
#[derive(Debug, Clone, PartialEq, Eq)]
struct SubjectChoice {
    subject: Subject,
    label: String,
}

impl fmt::Display for SubjectChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

pub fn view<'a>(
    form: &'a ContactForm,
    status: SubmitStatus,
    translator: &'a Translator,
) -> Element<'a, Message> {
    let dial_codes: Vec<DialCode> = COUNTRY_CODES
        .iter()
        .map(|&(code, country)| DialCode { code, country })
        .collect();
    let selected_dial_code = dial_codes
        .iter()
        .copied()
        .find(|dial| dial.code == form.country_code);

    let subjects: Vec<SubjectChoice> = Subject::ALL
        .into_iter()
        .map(|subject| SubjectChoice {
            subject,
            label: translator.t(subject.translation_key()),
        })
        .collect();
    let selected_subject = subjects
        .iter()
        .find(|choice| Some(choice.subject) == form.subject)
        .cloned();

    let labelled = |label: String, input: Element<'a, Message>| -> Element<'a, Message> {
        column![text(label).size(14), input].spacing(6).into()
    };

    let name = labelled(
        translator.t("contact.fullName"),
        text_input(&translator.t("contact.fullNamePlaceholder"), &form.full_name)
            .on_input(Message::ContactNameChanged)
            .padding(10)
            .into(),
    );

    let phone = labelled(
        translator.t("contact.phone"),
        row![
            pick_list(dial_codes, selected_dial_code, |dial: DialCode| {
                Message::ContactCountryChanged(dial.code.to_string())
            })
            .padding(10),
            text_input(&translator.t("contact.phonePlaceholder"), &form.phone)
                .on_input(Message::ContactPhoneChanged)
                .padding(10),
        ]
        .spacing(8)
        .into(),
    );

    let email = labelled(
        translator.t("contact.email"),
        text_input(&translator.t("contact.emailPlaceholder"), &form.email)
            .on_input(Message::ContactEmailChanged)
            .padding(10)
            .into(),
    );

    let subject = labelled(
        translator.t("contact.subject"),
        pick_list(subjects, selected_subject, |choice: SubjectChoice| {
            Message::ContactSubjectChanged(choice.subject)
        })
            .placeholder(translator.t("contact.subjectPlaceholder"))
            .padding(10)
            .width(Length::Fill)
            .into(),
    );

    let message = labelled(
        translator.t("contact.message"),
        text_input(&translator.t("contact.messagePlaceholder"), &form.message)
            .on_input(Message::ContactMessageChanged)
            .padding(10)
            .into(),
    );

    let submitting = status == SubmitStatus::Submitting;
    let submit_label = if submitting {
        translator.t("contact.sendingButton")
    } else {
        translator.t("contact.submitButton")
    };
    let submit = button(text(submit_label))
        .on_press_maybe((!submitting && form.is_complete()).then_some(Message::SubmitContact))
        .padding([10, 24])
        .style(button::primary);

    let mut content = column![
        text(translator.t("contact.formTitle")).size(32),
        name,
        phone,
        email,
        subject,
        message,
        submit,
    ]
    .spacing(16)
    .max_width(640.0)
    .align_x(Alignment::Start);

    match status {
        SubmitStatus::Success => {
            content = content.push(
                container(text(translator.t("contact.successMessage")))
                    .padding(12)
                    .style(container::rounded_box),
            );
        }
        SubmitStatus::Failed => {
            content = content.push(
                container(text(translator.t("contact.errorMessage")))
                    .padding(12)
                    .style(container::rounded_box),
            );
        }
        SubmitStatus::Idle | SubmitStatus::Submitting => {}
    }

    container(content)
        .padding(32)
        .center_x(Length::Fill)
        .into()
}
