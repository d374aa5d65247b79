use crate::app::input::helpers::{wrap_decrement, wrap_increment};
use crate::ui::screens::map::resort_at;
use ratatui::layout::Rect;
use skimap::config::{AppConfig, ViewLayout};
use skimap::data::{BluebirdDataset, LoadedDataset};
use skimap::resorts::{Resort, ResortRegistry};
use skimap::scroll::{NavKey, ScrollController};
use skimap::snow::SnowField;
use skimap::{Month, Section, Week};
use std::time::{Duration, Instant};
use throbber_widgets_tui::ThrobberState;

/// Scroll units per terminal row.
pub const CELL_PX: f64 = 20.0;
/// Scroll units per mouse wheel notch.
pub const WHEEL_NOTCH_PX: f64 = 100.0;
/// Sub-scroll progress at which the compact chart overlay appears.
pub const OVERLAY_SHOW_AT: f64 = 0.4;
/// Map hover and selection only respond below this sub-scroll progress.
pub const MAP_INTERACTIVE_BELOW: f64 = 0.6;
/// Sub-scroll progress at which the extended chart reveals its trend line.
pub const TREND_SHOW_AT: f64 = 0.4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartSelection {
    pub month: Month,
    pub week: Week,
}

impl ChartSelection {
    pub const fn season_start() -> Self {
        Self {
            month: Month::November,
            week: Week::First,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartOrder {
    Descending,
    NorthToSouth,
}

#[derive(Debug)]
pub struct App {
    pub running: bool,
    pub show_help: bool,
    pub config: AppConfig,
    pub registry: ResortRegistry,
    /// `None` while the background load is running.
    pub loaded: Option<LoadedDataset>,
    pub controller: ScrollController,
    pub snow: SnowField,
    pub throbber: ThrobberState,
    pub selection: ChartSelection,
    pub selected_resort: Option<&'static str>,
    pub hovered_resort: Option<&'static str>,
    /// Query text while the `/` prompt is open.
    pub search: Option<String>,
    pub status_message: String,
    pub area: Rect,
    started: Instant,
    last_frame: Instant,
    chart_was_visible: bool,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        let controller = ScrollController::new(config.scroll.clone(), 0.0);
        let snow = SnowField::new(config.seed);
        let now = Instant::now();
        Self {
            running: true,
            show_help: false,
            registry: ResortRegistry::builtin(),
            loaded: None,
            controller,
            snow,
            throbber: ThrobberState::default(),
            selection: ChartSelection::season_start(),
            selected_resort: None,
            hovered_resort: None,
            search: None,
            status_message: String::new(),
            area: Rect::default(),
            started: now,
            last_frame: now,
            chart_was_visible: false,
            config,
        }
    }

    /// Session time fed to the scroll controller.
    pub fn now(&self) -> Duration {
        self.started.elapsed()
    }

    pub fn update(&mut self) {
        let frame = Instant::now();
        let delta = frame.duration_since(self.last_frame);
        self.last_frame = frame;

        self.snow.advance(delta.as_secs_f64());
        if self.is_loading() {
            self.throbber.calc_next();
        }
        self.controller.tick(self.now());
        self.refresh_chart_visibility();
    }

    pub fn quit(&mut self) {
        log::info!("Quit requested");
        self.running = false;
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.area = Rect::new(0, 0, width, height);
        self.controller.set_viewport_height(f64::from(height) * CELL_PX);
    }

    /// `notches` is positive for scrolling down.
    pub fn wheel(&mut self, notches: f64) {
        let now = self.now();
        self.controller.on_wheel(notches * WHEEL_NOTCH_PX, now);
        self.refresh_chart_visibility();
    }

    pub fn navigate(&mut self, key: NavKey) {
        let now = self.now();
        log::debug!("{key:?} from the {} section", self.active_section());
        self.controller.on_key(key, now);
    }

    pub fn finish_loading(&mut self, loaded: LoadedDataset) {
        log::info!(
            "Bluebird data ready from {} ({} resorts)",
            loaded.origin,
            loaded.dataset.resort_names().len()
        );
        self.status_message = match &loaded.error {
            Some(err) => format!("Using {}: {err}", loaded.origin),
            None => format!("Bluebird data: {}", loaded.origin),
        };
        self.loaded = Some(loaded);
    }

    pub const fn is_loading(&self) -> bool {
        self.loaded.is_none()
    }

    pub fn dataset(&self) -> Option<&BluebirdDataset> {
        self.loaded.as_ref().map(|loaded| &loaded.dataset)
    }

    pub fn active_section(&self) -> Section {
        section_at(self.controller.snapshot().section_index)
    }

    /// The two sections of the current blend with their opacities.
    pub fn section_weights(&self) -> [(Section, f64); 2] {
        let (lower, upper) = self.controller.blend_pair();
        let progress = self.controller.snapshot().transition_progress;
        [
            (section_at(lower), 1.0 - progress),
            (section_at(upper), progress),
        ]
    }

    /// Section drawn this frame and its opacity (at least one half).
    pub fn dominant_section(&self) -> (Section, f64) {
        let [lower, upper] = self.section_weights();
        if upper.1 > lower.1 {
            upper
        } else {
            lower
        }
    }

    pub fn sub_progress(&self) -> f64 {
        self.controller.snapshot().sub_scroll_progress
    }

    pub fn overlay_visible(&self) -> bool {
        self.config.layout == ViewLayout::Compact
            && self.active_section() == Section::Map
            && self.sub_progress() >= OVERLAY_SHOW_AT
    }

    pub fn map_interactive(&self) -> bool {
        self.active_section() == Section::Map
            && !self.controller.snapshot().is_transitioning
            && self.sub_progress() < MAP_INTERACTIVE_BELOW
    }

    pub fn chart_section_active(&self) -> bool {
        self.config.layout == ViewLayout::Extended && self.active_section() == Section::Chart
    }

    pub fn chart_visible(&self) -> bool {
        self.overlay_visible() || self.chart_section_active()
    }

    pub fn trend_visible(&self) -> bool {
        self.chart_section_active() && self.sub_progress() >= TREND_SHOW_AT
    }

    fn refresh_chart_visibility(&mut self) {
        let visible = self.chart_visible();
        if visible && !self.chart_was_visible {
            log::debug!("Chart shown; selection reset to season start");
            self.selection = ChartSelection::season_start();
        }
        self.chart_was_visible = visible;
    }

    pub fn chart_order(&self) -> ChartOrder {
        if self.chart_section_active() {
            ChartOrder::Descending
        } else {
            ChartOrder::NorthToSouth
        }
    }

    /// Resorts and values for the current month/week in display order.
    pub fn chart_rows(&self) -> Vec<(&Resort, f64)> {
        let Some(dataset) = self.dataset() else {
            return Vec::new();
        };
        let ChartSelection { month, week } = self.selection;
        let ordered = match self.chart_order() {
            ChartOrder::Descending => self.registry.by_value_desc(dataset, month, week),
            ChartOrder::NorthToSouth => self.registry.north_to_south(),
        };
        ordered
            .into_iter()
            .map(|resort| (resort, dataset.value(month, week, resort.name)))
            .collect()
    }

    /// Resort the trend line and hover card describe.
    pub fn highlighted_resort(&self) -> Option<&Resort> {
        self.hovered_resort
            .or(self.selected_resort)
            .and_then(|id| self.registry.get(id))
    }

    pub fn trend_resort(&self) -> Option<&Resort> {
        self.highlighted_resort()
            .or_else(|| self.chart_rows().first().map(|(resort, _)| *resort))
    }

    pub fn cycle_resort(&mut self, forward: bool) {
        let ordered: Vec<&'static str> = self
            .registry
            .north_to_south()
            .into_iter()
            .map(|resort| resort.id)
            .collect();
        let len = ordered.len();
        let next = match self
            .selected_resort
            .and_then(|id| ordered.iter().position(|candidate| *candidate == id))
        {
            Some(index) if forward => wrap_increment(index, len),
            Some(index) => wrap_decrement(index, len),
            None if forward => 0,
            None => len.saturating_sub(1),
        };
        self.selected_resort = ordered.get(next).copied();
        self.hovered_resort = None;
    }

    pub fn hover_at(&mut self, column: u16, row: u16) {
        self.hovered_resort = if self.map_interactive() {
            resort_at(&self.registry, self.area, column, row).map(|resort| resort.id)
        } else {
            None
        };
    }

    pub fn start_search(&mut self) {
        self.search = Some(String::new());
    }

    pub fn cancel_search(&mut self) {
        self.search = None;
    }

    pub fn commit_search(&mut self) {
        let Some(query) = self.search.take() else {
            return;
        };
        match self.registry.search(&query) {
            Some(resort) => {
                self.status_message = format!("Jumped to {}", resort.name);
                self.selected_resort = Some(resort.id);
                self.hovered_resort = None;
            }
            None => {
                self.status_message = format!("No resort matches \"{query}\"");
            }
        }
    }

    pub fn next_month(&mut self) {
        self.selection.month = self.selection.month.next();
    }

    pub fn prev_month(&mut self) {
        self.selection.month = self.selection.month.prev();
    }

    pub fn next_week(&mut self) {
        self.selection.week = self.selection.week.next();
    }

    pub fn set_week(&mut self, number: usize) {
        if let Some(week) = number.checked_sub(1).and_then(Week::from_index) {
            self.selection.week = week;
        }
    }

    pub fn toggle_snow(&mut self) {
        self.snow.toggle_pause();
    }
}

fn section_at(index: usize) -> Section {
    Section::from_index(index).unwrap_or(Section::Home)
}
