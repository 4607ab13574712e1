use iced::keyboard::{self, key};
use iced::widget::image::Handle;
use iced::widget::{button, column, horizontal_space, row, scrollable, stack, text};
use iced::{window, Alignment, Element, Length, Size, Subscription, Task, Theme};
use rfd::FileDialog;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod contact;
mod error;
mod i18n;
mod media;
mod state;
mod ui;

use config::AppConfig;
use contact::{ContactError, ContactForm, Subject, SubmitStatus};
use error::CatalogError;
use i18n::Translator;
use media::cache::HandleCache;
use media::delivery::{tier_url, ImageTier};
use media::fetch::{fetch_image, FetchError};
use state::catalog::{load_catalog_file, Catalog};
use state::lightbox::{LightboxKey, LightboxNavigator, Outcome};
use state::session::LightboxSession;
use state::pager::{Direction, Filter, GalleryPager};
use state::thumbnails::{max_visible_for, ThumbnailWindow};

/// Top-level tabs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Projects,
    Contact,
}

/// Main application state
struct EpaGallery {
    config: AppConfig,
    /// Shared HTTP client for images and the contact form
    client: reqwest::Client,
    translator: Translator,
    pager: GalleryPager,
    /// Lightbox navigation and its full-size images
    lightbox: LightboxSession,
    /// Covers and strip thumbnails, kept for the whole run
    shared_images: HandleCache,
    window_width: f32,
    tab: Tab,
    contact_form: ContactForm,
    submit_status: SubmitStatus,
    /// Status message to display to the user
    status: String,
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    ShowTab(Tab),
    ToggleLanguage,
    /// User clicked the "Load Catalog" button
    LoadCatalog,
    /// Background catalog load finished
    CatalogLoaded(Result<Catalog, CatalogError>),
    /// A cover or strip thumbnail arrived
    SharedImageFetched {
        url: String,
        result: Result<Handle, FetchError>,
    },

    SetFilter(Filter),
    GoToPage(usize, Direction),
    OpenProject(usize),

    CloseLightbox,
    NextImage,
    PreviousImage,
    JumpTo(usize),
    StepBack,
    StepForward,
    /// Horizontal offset of a finished drag over the image
    Swiped(f32),
    KeyPressed(LightboxKey),
    /// A lightbox image (current, preload or fallback) arrived
    SessionImageFetched {
        session: u64,
        url: String,
        result: Result<Handle, FetchError>,
    },
    /// Click inside the lightbox panel, swallowed so the backdrop does not close
    Noop,
    WindowResized(Size),

    ContactNameChanged(String),
    ContactCountryChanged(String),
    ContactPhoneChanged(String),
    ContactEmailChanged(String),
    ContactSubjectChanged(Subject),
    ContactMessageChanged(String),
    SubmitContact,
    ContactSubmitted(Result<(), ContactError>),
}

impl EpaGallery {
    /// Create a new instance of the application
    fn new() -> (Self, Task<Message>) {
        let config = AppConfig::load();
        let translator = Translator::load();

        let catalog = Catalog::bundled().unwrap_or_else(|e| {
            tracing::error!("❌ Bundled catalog is unusable: {}", e);
            Catalog::default()
        });
        if catalog.is_empty() {
            tracing::warn!("⚠️  Catalog has no projects");
        } else {
            tracing::info!("🏗️  Gallery initialized with {} projects", catalog.len());
        }

        let status = format!("{} projects", catalog.len());
        let pager = GalleryPager::new(catalog, config.page_size);
        let lightbox = LightboxSession::new(LightboxNavigator::new(
            config.swipe_threshold,
            config.placeholder_url.clone(),
        ));

        let mut app = EpaGallery {
            client: reqwest::Client::new(),
            translator,
            pager,
            lightbox,
            shared_images: HandleCache::default(),
            window_width: f32::INFINITY,
            tab: Tab::Projects,
            contact_form: ContactForm::default(),
            submit_status: SubmitStatus::Idle,
            status,
            config,
        };

        let startup = match app.config.catalog_path.clone() {
            Some(path) => Task::perform(load_catalog_file(path), Message::CatalogLoaded),
            None => app.fetch_covers(),
        };

        (app, startup)
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::ShowTab(tab) => {
                self.tab = tab;
                Task::none()
            }
            Message::ToggleLanguage => {
                self.translator.toggle();
                tracing::info!("🌐 Language switched to {}", self.translator.language().code());
                Task::none()
            }
            Message::LoadCatalog => {
                // Show the native file picker dialog
                let file = FileDialog::new()
                    .set_title("Select Project Catalog")
                    .add_filter("JSON", &["json"])
                    .pick_file();

                match file {
                    Some(path) => {
                        self.status = format!("Loading {}...", path.display());
                        Task::perform(load_catalog_file(path), Message::CatalogLoaded)
                    }
                    None => Task::none(),
                }
            }
            Message::CatalogLoaded(Ok(catalog)) => {
                self.status = format!("{} projects", catalog.len());
                self.lightbox.close();
                self.pager.replace_catalog(catalog);
                self.fetch_covers()
            }
            Message::CatalogLoaded(Err(e)) => {
                tracing::warn!("⚠️  {}", e);
                self.status = e.to_string();
                Task::none()
            }
            Message::SharedImageFetched { url, result } => {
                match result {
                    Ok(handle) => self.shared_images.insert(url, handle),
                    Err(e) => {
                        tracing::debug!("{}", e);
                        self.shared_images.failed(&url);
                    }
                }
                Task::none()
            }

            Message::SetFilter(filter) => {
                self.pager.set_filter(filter);
                self.fetch_covers()
            }
            Message::GoToPage(index, direction) => {
                if self.pager.go_to_page(index, direction) {
                    self.fetch_covers()
                } else {
                    Task::none()
                }
            }
            Message::OpenProject(id) => match self.pager.catalog().get(id).cloned() {
                Some(project) => {
                    let wanted = self.lightbox.open(project);
                    self.fetch_lightbox_images(wanted)
                }
                None => Task::none(),
            },

            Message::CloseLightbox => {
                self.lightbox.close();
                Task::none()
            }
            Message::NextImage => {
                let moved = self.lightbox.navigator_mut().next();
                self.navigated(moved)
            }
            Message::PreviousImage => {
                let moved = self.lightbox.navigator_mut().previous();
                self.navigated(moved)
            }
            Message::JumpTo(index) => {
                let moved = self.lightbox.navigator_mut().jump_to(index);
                self.navigated(moved)
            }
            Message::StepBack => {
                let moved = self.lightbox.navigator_mut().step_back();
                self.navigated(moved)
            }
            Message::StepForward => {
                let moved = self.lightbox.navigator_mut().step_forward();
                self.navigated(moved)
            }
            Message::Swiped(offset_x) => {
                let moved = self.lightbox.navigator_mut().swipe(offset_x);
                self.navigated(moved)
            }
            Message::KeyPressed(key) => match self.lightbox.navigator_mut().handle_key(key) {
                Outcome::Navigated => self.after_navigation(),
                Outcome::Closed => {
                    self.lightbox.close();
                    Task::none()
                }
                Outcome::Ignored => Task::none(),
            },
            Message::SessionImageFetched {
                session,
                url,
                result,
            } => self.session_image_fetched(session, url, result),
            Message::Noop => Task::none(),
            Message::WindowResized(size) => {
                self.window_width = size.width;
                self.request_thumbnails()
            }

            Message::ContactNameChanged(value) => {
                self.contact_form.full_name = value;
                Task::none()
            }
            Message::ContactCountryChanged(value) => {
                self.contact_form.country_code = value;
                Task::none()
            }
            Message::ContactPhoneChanged(value) => {
                self.contact_form.set_phone(&value);
                Task::none()
            }
            Message::ContactEmailChanged(value) => {
                self.contact_form.email = value;
                Task::none()
            }
            Message::ContactSubjectChanged(subject) => {
                self.contact_form.subject = Some(subject);
                Task::none()
            }
            Message::ContactMessageChanged(value) => {
                self.contact_form.message = value;
                Task::none()
            }
            Message::SubmitContact => {
                self.submit_status = SubmitStatus::Submitting;
                Task::perform(
                    contact::submit(
                        self.client.clone(),
                        self.config.contact_endpoint.clone(),
                        self.config.contact_access_key.clone(),
                        self.contact_form.clone(),
                    ),
                    Message::ContactSubmitted,
                )
            }
            Message::ContactSubmitted(Ok(())) => {
                self.submit_status = SubmitStatus::Success;
                self.contact_form.clear();
                Task::none()
            }
            Message::ContactSubmitted(Err(e)) => {
                tracing::warn!("⚠️  Contact form failed: {}", e);
                self.submit_status = SubmitStatus::Failed;
                Task::none()
            }
        }
    }

    fn navigated(&mut self, moved: bool) -> Task<Message> {
        if moved {
            self.after_navigation()
        } else {
            Task::none()
        }
    }

    /// Load the new current image and start preloading its neighbours
    fn after_navigation(&mut self) -> Task<Message> {
        let wanted = self.lightbox.after_navigation();
        self.fetch_lightbox_images(wanted)
    }

    fn fetch_lightbox_images(&mut self, urls: Vec<String>) -> Task<Message> {
        let session = self.lightbox.navigator().session();
        let mut tasks: Vec<Task<Message>> = urls
            .into_iter()
            .map(|url| self.fetch_session_image(session, url))
            .collect();

        tasks.push(self.request_thumbnails());
        Task::batch(tasks)
    }

    fn session_image_fetched(
        &mut self,
        session: u64,
        url: String,
        result: Result<Handle, FetchError>,
    ) -> Task<Message> {
        let handle = match result {
            Ok(handle) => Some(handle),
            Err(e) => {
                tracing::debug!("{}", e);
                None
            }
        };

        match self
            .lightbox
            .image_fetched(session, url, handle, &self.shared_images)
        {
            Some(fallback) => self.fetch_session_image(session, fallback),
            None => Task::none(),
        }
    }

    fn fetch_session_image(&self, session: u64, url: String) -> Task<Message> {
        Task::perform(
            fetch_image(self.client.clone(), url.clone()),
            move |result| Message::SessionImageFetched {
                session,
                url: url.clone(),
                result,
            },
        )
    }

    /// Fetch covers for the cards on the current page
    fn fetch_covers(&mut self) -> Task<Message> {
        let urls: Vec<String> = self
            .pager
            .current_page_items()
            .into_iter()
            .map(|project| project.cover_image.clone())
            .collect();
        self.fetch_shared(urls)
    }

    /// Fetch strip thumbnails for the visible window
    fn request_thumbnails(&mut self) -> Task<Message> {
        let navigator = self.lightbox.navigator();
        let Some(project) = navigator.project() else {
            return Task::none();
        };
        if project.image_count <= 1 {
            return Task::none();
        }

        let window = ThumbnailWindow::compute(
            navigator.index(),
            project.image_count,
            self.max_thumbnails(),
        );
        let urls: Vec<String> = window
            .indices()
            .map(|index| tier_url(&project.images[index].url, ImageTier::NavThumb))
            .collect();

        self.fetch_shared(urls)
    }

    fn fetch_shared(&mut self, urls: Vec<String>) -> Task<Message> {
        let wanted: Vec<String> = urls
            .into_iter()
            .filter(|url| self.shared_images.request(url))
            .collect();

        let tasks: Vec<Task<Message>> = wanted
            .into_iter()
            .map(|url| {
                Task::perform(
                    fetch_image(self.client.clone(), url.clone()),
                    move |result| Message::SharedImageFetched {
                        url: url.clone(),
                        result,
                    },
                )
            })
            .collect();

        Task::batch(tasks)
    }

    fn is_narrow(&self) -> bool {
        self.window_width < self.config.narrow_breakpoint
    }

    fn max_thumbnails(&self) -> usize {
        max_visible_for(
            self.window_width,
            self.config.narrow_breakpoint,
            self.config.thumbnails_narrow,
            self.config.thumbnails_wide,
        )
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let tab_button = |label: String, tab: Tab| {
            let style = if self.tab == tab {
                button::primary
            } else {
                button::secondary
            };
            button(text(label))
                .on_press(Message::ShowTab(tab))
                .style(style)
        };

        let nav = row![
            text("KORKMAZ EPA").size(22),
            horizontal_space(),
            tab_button(self.translator.t("nav.projects"), Tab::Projects),
            tab_button(self.translator.t("nav.contact"), Tab::Contact),
            button(text(self.translator.t("nav.language")))
                .on_press(Message::ToggleLanguage)
                .style(button::text),
        ]
        .spacing(12)
        .padding(16)
        .align_y(Alignment::Center);

        let page: Element<Message> = match self.tab {
            Tab::Projects => column![
                ui::gallery::view(&self.pager, &self.translator, &self.shared_images),
                row![
                    button(text(self.translator.t("projects.loadCatalog")))
                        .on_press(Message::LoadCatalog)
                        .style(button::secondary),
                    text(&self.status).size(14),
                ]
                .spacing(12)
                .padding(16)
                .align_y(Alignment::Center),
            ]
            .into(),
            Tab::Contact => {
                ui::contact::view(&self.contact_form, self.submit_status, &self.translator)
            }
        };

        let base = column![nav, scrollable(page).height(Length::Fill)];

        let viewport = ui::lightbox::Viewport {
            narrow: self.is_narrow(),
            max_thumbnails: self.max_thumbnails(),
        };

        match ui::lightbox::view(
            self.lightbox.navigator(),
            &self.translator,
            self.lightbox.images(),
            &self.shared_images,
            viewport,
        ) {
            Some(overlay) => stack![base, overlay].into(),
            None => base.into(),
        }
    }

    /// Keyboard is only listened to while the lightbox is open
    fn subscription(&self) -> Subscription<Message> {
        let resize = window::resize_events().map(|(_id, size)| Message::WindowResized(size));

        if self.lightbox.navigator().is_open() {
            Subscription::batch([resize, keyboard::on_key_press(lightbox_key)])
        } else {
            resize
        }
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

fn lightbox_key(key: keyboard::Key, _modifiers: keyboard::Modifiers) -> Option<Message> {
    let key = match key.as_ref() {
        keyboard::Key::Named(key::Named::ArrowLeft) => LightboxKey::Left,
        keyboard::Key::Named(key::Named::ArrowRight) => LightboxKey::Right,
        keyboard::Key::Named(key::Named::Escape) => LightboxKey::Escape,
        _ => return None,
    };
    Some(Message::KeyPressed(key))
}

fn main() -> iced::Result {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "epa_gallery=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    iced::application("Korkmaz EPA Projects", EpaGallery::update, EpaGallery::view)
        .subscription(EpaGallery::subscription)
        .theme(EpaGallery::theme)
        .window_size((1280.0, 820.0))
        .centered()
        .run_with(EpaGallery::new)
}
