//! usb-identity GUI: iced settings panel for the appliance's USB identity.

use anyhow::Context;
use iced::widget::{button, column, container, pick_list, row, text, text_input};
use iced::{Color, Element, Length, Subscription, Task as IcedTask, Theme};
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

use usb_identity_core::config::{Config, DeviceConfig};
use usb_identity_core::error::{Error, Result};
use usb_identity_core::http::HttpService;
use usb_identity_core::i18n::{Locale, Text};
use usb_identity_core::preset::{self, Preset};
use usb_identity_core::{Field, Identity, IdentityService, IdentityState, Notice};

/// How often an on-screen notice is checked for expiry.
const NOTICE_TICK: Duration = Duration::from_millis(250);
const INPUT_WIDTH: f32 = 200.0;
const AMBER: Color = Color::from_rgb(0.96, 0.62, 0.04);
const GREEN: Color = Color::from_rgb(0.29, 0.78, 0.44);
const RED: Color = Color::from_rgb(0.94, 0.33, 0.31);

fn main() -> anyhow::Result<()> {
    let config = Config::load(None).unwrap_or_else(|e| {
        // Logging is not up yet.
        eprintln!("{e}, using defaults");
        Config::default()
    });

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.ui.log_level)),
        )
        .init();

    // The blocking client must be built outside the async runtime.
    let service = connect(&config.device)?;

    iced::application(App::title, App::update, App::view)
        .theme(|_| Theme::Dark)
        .subscription(App::subscription)
        .run_with(move || App::new(service, &config))
        .map_err(|e| anyhow::anyhow!("panel exited with error: {e}"))
}

fn connect(device: &DeviceConfig) -> anyhow::Result<Arc<dyn IdentityService>> {
    let service = HttpService::from_config(device)
        .context("cannot create HTTP client, not starting the panel")?;
    tracing::debug!(endpoint = service.endpoint(), "Using HTTP service");
    Ok(Arc::new(service))
}

/// Dropdown entry for one catalog preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PresetOption {
    key: &'static str,
    label: &'static str,
}

impl PresetOption {
    fn new(preset: &Preset, locale: Locale) -> Self {
        Self {
            key: preset.key,
            label: preset.label(locale),
        }
    }
}

impl fmt::Display for PresetOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label)
    }
}

/// Application state.
struct App {
    state: IdentityState,
    service: Arc<dyn IdentityService>,
    locale: Locale,
    options: Vec<PresetOption>,
    notice: Option<(Notice, Instant)>,
    notice_ttl: Duration,
}

#[derive(Debug, Clone)]
enum Message {
    Loaded(Result<Identity>),
    PresetSelected(PresetOption),
    FieldEdited(Field, String),
    Save,
    Saved(Result<()>),
    Tick,
}

impl App {
    /// Build the panel and start the one-time load.
    fn new(service: Arc<dyn IdentityService>, config: &Config) -> (Self, IcedTask<Message>) {
        let locale = config.ui.locale;
        let mut state = IdentityState::new();
        state.begin_load();

        let load = fetch_identity(Arc::clone(&service));
        let app = Self {
            state,
            service,
            locale,
            options: preset::presets()
                .iter()
                .map(|p| PresetOption::new(p, locale))
                .collect(),
            notice: None,
            notice_ttl: Duration::from_secs(config.ui.notice_secs),
        };
        (app, load)
    }

    fn title(&self) -> String {
        Text::Title.localize(self.locale).to_string()
    }

    fn subscription(&self) -> Subscription<Message> {
        if self.notice.is_some() {
            iced::time::every(NOTICE_TICK).map(|_| Message::Tick)
        } else {
            Subscription::none()
        }
    }

    fn update(&mut self, message: Message) -> IcedTask<Message> {
        match message {
            Message::Loaded(outcome) => {
                self.state.finish_load(outcome);
            }
            Message::PresetSelected(option) => {
                self.state.select_preset(option.key);
            }
            Message::FieldEdited(field, value) => {
                self.state.edit_field(field, value);
            }
            Message::Save => {
                if let Some(identity) = self.state.begin_save() {
                    return push_identity(Arc::clone(&self.service), identity);
                }
            }
            Message::Saved(outcome) => {
                let notice = self.state.finish_save(outcome, self.locale);
                self.notice = Some((notice, Instant::now()));
            }
            Message::Tick => {
                if let Some((_, shown)) = &self.notice {
                    if shown.elapsed() >= self.notice_ttl {
                        self.notice = None;
                    }
                }
            }
        }
        IcedTask::none()
    }

    fn view(&self) -> Element<'_, Message> {
        let t = |key: Text| key.localize(self.locale);

        let header = column![
            text(t(Text::Title)).size(20),
            text(t(Text::Description)).size(13),
        ]
        .spacing(4);

        let selected = self
            .options
            .iter()
            .find(|o| o.key == self.state.selected_preset_key())
            .copied();
        let mut preset_picker = row![pick_list(
            self.options.clone(),
            selected,
            Message::PresetSelected
        )
        .width(Length::Fixed(INPUT_WIDTH))]
        .spacing(8);
        if self.state.is_loading() {
            preset_picker = preset_picker.push(text(t(Text::Loading)).size(13));
        }

        let mut form = column![labelled(t(Text::Preset), preset_picker.into())].spacing(12);

        let identity = self.state.identity();
        for (field, label) in [
            (Field::Vid, Text::Vid),
            (Field::Pid, Text::Pid),
            (Field::Manufacturer, Text::Manufacturer),
            (Field::Product, Text::Product),
        ] {
            let input = text_input(field.placeholder(), identity.get(field))
                .on_input(move |v| Message::FieldEdited(field, v))
                .width(Length::Fixed(INPUT_WIDTH));
            form = form.push(labelled(t(label), input.into()));
        }

        let save_label = if self.state.is_saving() {
            t(Text::Saving)
        } else {
            t(Text::Save)
        };
        let footer = row![
            text(t(Text::RebootRequired)).size(12).color(AMBER).width(Length::Fill),
            button(save_label).on_press(Message::Save),
        ]
        .spacing(12);
        form = form.push(footer);

        let mut content = column![header, container(form).padding(16).width(Length::Fill)]
            .spacing(14)
            .padding(20)
            .max_width(560);

        if let Some((notice, _)) = &self.notice {
            let color = if notice.is_error() { RED } else { GREEN };
            content = content.push(text(&notice.text).size(14).color(color));
        }

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x(Length::Fill)
            .into()
    }
}

fn labelled<'a>(label: &'a str, control: Element<'a, Message>) -> Element<'a, Message> {
    row![text(label).size(14).width(Length::Fill), control]
        .spacing(10)
        .into()
}

fn fetch_identity(service: Arc<dyn IdentityService>) -> IcedTask<Message> {
    IcedTask::perform(
        async move {
            tokio::task::spawn_blocking(move || service.get_usb_identity())
                .await
                .unwrap_or_else(|e| Err(Error::Transport(format!("load task: {e}"))))
        },
        Message::Loaded,
    )
}

fn push_identity(service: Arc<dyn IdentityService>, identity: Identity) -> IcedTask<Message> {
    IcedTask::perform(
        async move {
            tokio::task::spawn_blocking(move || service.set_usb_identity(&identity))
                .await
                .unwrap_or_else(|e| Err(Error::Transport(format!("save task: {e}"))))
        },
        Message::Saved,
    )
}
