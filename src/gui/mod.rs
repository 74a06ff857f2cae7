use iced::widget::{
    button, column, container, mouse_area, pick_list, text, text_input, tooltip, Space,
};
use iced::{mouse, window, Alignment, Element, Length, Size, Task};
use std::sync::Arc;

pub mod controller;
pub mod messages;

pub use controller::{Controller, FormState, ViewState};
pub use messages::Message;

use crate::config::WindowConfig;
use crate::download::Downloader;
use crate::extractors::{AudioFormat, Bitrate, Channels};

const TITLE: &str = "YouTube Audio Downloader";
const INPUT_WIDTH: f32 = 360.0;

/// Open the main window and block until it is closed
pub fn run(window: WindowConfig, downloader: Arc<Downloader>) -> iced::Result {
    let initial_size = Size::new(window.width, window.height);

    iced::application(App::title, App::update, App::view)
        .window_size(initial_size)
        .run_with(move || (App::new(downloader, window), Task::none()))
}

struct App {
    controller: Controller,
    downloader: Arc<Downloader>,
    window: WindowConfig,
}

impl App {
    fn new(downloader: Arc<Downloader>, window: WindowConfig) -> Self {
        Self {
            controller: Controller::default(),
            downloader,
            window,
        }
    }

    fn title(&self) -> String {
        TITLE.to_string()
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::UrlChanged(url) => self.controller.on_url_changed(url),
            Message::ArtistChanged(artist) => self.controller.form.artist = artist,
            Message::SongNameChanged(song_name) => self.controller.form.song_name = song_name,
            Message::FormatSelected(format) => self.controller.form.format = format,
            Message::BitrateSelected(bitrate) => self.controller.form.bitrate = bitrate,
            Message::ChannelsSelected(channels) => self.controller.form.channels = channels,
            Message::ToggleAdvanced => {
                let size = self.controller.toggle_advanced_panel(&self.window);
                return window::get_latest().and_then(move |id| window::resize(id, size));
            }
            Message::DownloadPressed => {
                if let Some(request) = self.controller.submit() {
                    let downloader = Arc::clone(&self.downloader);
                    // Runs on the executor; the result comes back as a message
                    return Task::perform(
                        async move { downloader.download_audio(&request).await },
                        Message::DownloadFinished,
                    );
                }
            }
            Message::DownloadFinished(result) => self.controller.on_task_complete(result),
        }

        Task::none()
    }

    fn view(&self) -> Element<'_, Message> {
        let form = &self.controller.form;
        let view = &self.controller.view;

        let url_input = text_input("https://www.youtube.com/watch?v=...", &form.url)
            .on_input(Message::UrlChanged)
            .width(Length::Fixed(INPUT_WIDTH));

        let artist_input = text_input("", &form.artist)
            .on_input_maybe(view.search_inputs_enabled.then_some(Message::ArtistChanged))
            .width(Length::Fixed(INPUT_WIDTH));

        let song_name_input = text_input("", &form.song_name)
            .on_input_maybe(view.search_inputs_enabled.then_some(Message::SongNameChanged))
            .width(Length::Fixed(INPUT_WIDTH));

        let format_label = tooltip(
            text("Preferred Format:"),
            text("aac and alac are packed within the .m4a file container."),
            tooltip::Position::Right,
        );

        let advanced_toggle = mouse_area(text(self.controller.advanced_toggle_label()))
            .on_press(Message::ToggleAdvanced)
            .interaction(mouse::Interaction::Pointer);

        let content = column![
            text("YouTube URL:"),
            url_input,
            text("Artist:"),
            artist_input,
            text("Song Name:"),
            song_name_input,
            format_label,
            pick_list(AudioFormat::ALL, Some(form.format), Message::FormatSelected),
            button("Download").on_press(Message::DownloadPressed),
            advanced_toggle,
        ]
        .push_maybe(view.advanced_panel_visible.then(|| self.advanced_panel()))
        .push(Space::with_height(Length::Fill))
        .push(text(&view.status))
        .spacing(6)
        .padding(12)
        .width(Length::Fill)
        .align_x(Alignment::Center);

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    fn advanced_panel(&self) -> Element<'_, Message> {
        let form = &self.controller.form;

        let bitrate_label = tooltip(
            text("Bitrate:"),
            text("Only applies to mp3."),
            tooltip::Position::Right,
        );

        let panel = column![
            text("Advanced Options:"),
            bitrate_label,
            pick_list(Bitrate::ALL, Some(form.bitrate), Message::BitrateSelected),
            text("Audio Channels:"),
            pick_list(Channels::ALL, Some(form.channels), Message::ChannelsSelected),
        ]
        .spacing(4)
        .align_x(Alignment::Center);

        container(panel)
            .padding(8)
            .style(container::bordered_box)
            .into()
    }
}
