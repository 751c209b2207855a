use std::path::PathBuf;

use eframe::egui;

use crate::model::LayoutElement;
use crate::persistence::{self, LayoutRepository, SavedLayout, VenueId};
use crate::settings::AppSettings;
use crate::store::LayoutStore;

mod actions;
mod command_palette;
mod gesture;
mod help;
mod properties;
mod render;
mod surface;
mod toolbar;
mod update;
mod viewport;

pub struct Startup {
    pub venue: VenueId,
    pub repository: Box<dyn LayoutRepository>,
    pub settings: AppSettings,
    pub settings_path: PathBuf,
    /// Previously stored layout for `venue`; `None` starts an empty canvas.
    pub saved: Option<SavedLayout>,
}

pub struct EditorApp {
    store: LayoutStore,
    venue: VenueId,
    repository: Box<dyn LayoutRepository>,
    settings: AppSettings,
    settings_path: PathBuf,
    gesture: Option<gesture::Gesture>,
    canvas_size: egui::Vec2,
    status: Option<String>,
    command_palette: command_palette::CommandPalette,
    show_help: bool,
    /// Elements as of the last successful save, for the unsaved marker.
    saved_elements: Vec<LayoutElement>,
}

impl EditorApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, startup: Startup) -> Self {
        Self::from_startup(startup)
    }

    fn from_startup(startup: Startup) -> Self {
        let Startup {
            venue,
            repository,
            settings,
            settings_path,
            saved,
        } = startup;

        let mut store = LayoutStore::new(settings.grid(), settings.history_limit);
        match saved {
            Some(layout) => persistence::restore(&mut store, layout),
            None => persistence::load(&mut store, None),
        }
        let saved_elements = store.elements().to_vec();

        Self {
            store,
            venue,
            repository,
            settings,
            settings_path,
            gesture: None,
            canvas_size: egui::Vec2::ZERO,
            status: None,
            command_palette: command_palette::CommandPalette::default(),
            show_help: false,
            saved_elements,
        }
    }

    fn is_dirty(&self) -> bool {
        self.store.elements() != self.saved_elements.as_slice()
    }
}
