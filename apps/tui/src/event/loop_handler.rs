use color_eyre::Result;
use crossterm::event::{self, Event, KeyEventKind};
use skimap::config::AppConfig;
use skimap::data::{default_sources, load_in_background, DatasetOrigin, LoadedDataset};
use skimap::resorts::ResortRegistry;
use skimap::{Month, Week};
use std::fmt;
use tokio::task::JoinHandle;

use crate::app::{handle_key, handle_mouse, App};
use crate::terminal::Tui;
use crate::ui;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum LoadState {
    Pending,
    Loading,
    Ready,
}

impl fmt::Display for LoadState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "Pending"),
            Self::Loading => write!(f, "Loading"),
            Self::Ready => write!(f, "Ready"),
        }
    }
}

/// Background dataset load driven from the UI loop.
struct DatasetLoader {
    state: LoadState,
    task: Option<JoinHandle<LoadedDataset>>,
}

impl DatasetLoader {
    const fn new() -> Self {
        Self {
            state: LoadState::Pending,
            task: None,
        }
    }

    fn start(&mut self, config: &AppConfig, registry: &ResortRegistry) {
        if self.state != LoadState::Pending {
            log::warn!("Dataset load requested while {}", self.state);
            return;
        }
        let names = registry.all().iter().map(|resort| resort.name.to_string()).collect();
        let (primary, fallback) = default_sources(config.data_path.as_deref(), config.seed, names);
        self.task = Some(tokio::spawn(load_in_background(primary, fallback)));
        self.state = LoadState::Loading;
        log::debug!("Dataset load {}", self.state);
    }

    async fn poll(&mut self, app: &mut App) {
        if !self.task.as_ref().is_some_and(JoinHandle::is_finished) {
            return;
        }
        let Some(task) = self.task.take() else {
            return;
        };
        let loaded = match task.await {
            Ok(loaded) => loaded,
            Err(err) => {
                log::error!("Dataset task panicked: {err}");
                LoadedDataset {
                    dataset: skimap::data::BluebirdDataset::default(),
                    origin: DatasetOrigin::Empty,
                    error: None,
                }
            }
        };
        app.finish_loading(loaded);
        self.state = LoadState::Ready;
    }
}

/// Run the application in headless mode (no UI)
pub async fn run_headless(config: &AppConfig, json: bool) -> Result<()> {
    let registry = ResortRegistry::builtin();
    let names = registry.all().iter().map(|resort| resort.name.to_string()).collect();
    let (primary, fallback) = default_sources(config.data_path.as_deref(), config.seed, names);
    let loaded = load_in_background(primary, fallback).await;

    let ranking = build_ranking(&registry, &loaded, config.month, config.week);
    if json {
        println!("{}", serde_json::to_string_pretty(&ranking)?);
    } else {
        render_ranking_text(&ranking);
    }

    Ok(())
}

fn render_ranking_text(ranking: &HeadlessRanking) {
    println!("\nBluebird Days");
    println!("=============");
    println!("{} {} (source: {})", ranking.month, ranking.week, ranking.origin);
    if let Some(warning) = &ranking.warning {
        println!("Warning: {warning}");
    }
    println!();
    for row in &ranking.resorts {
        println!("{:>2}. {:<24} {:>4.1}", row.rank, row.name, row.value);
    }
    println!("\nGenerated {}", ranking.generated_at);
}

fn build_ranking(
    registry: &ResortRegistry,
    loaded: &LoadedDataset,
    month: Month,
    week: Week,
) -> HeadlessRanking {
    let resorts = registry
        .by_value_desc(&loaded.dataset, month, week)
        .into_iter()
        .enumerate()
        .map(|(index, resort)| HeadlessResort {
            rank: index + 1,
            id: resort.id.to_string(),
            name: resort.name.to_string(),
            value: loaded.dataset.value(month, week, resort.name),
        })
        .collect();

    HeadlessRanking {
        generated_at: chrono::Utc::now().to_rfc3339(),
        origin: loaded.origin,
        warning: loaded.error.as_ref().map(ToString::to_string),
        month,
        week: week.as_str().to_string(),
        resorts,
    }
}

#[derive(serde::Serialize)]
struct HeadlessRanking {
    generated_at: String,
    origin: DatasetOrigin,
    warning: Option<String>,
    month: Month,
    week: String,
    resorts: Vec<HeadlessResort>,
}

#[derive(serde::Serialize)]
struct HeadlessResort {
    rank: usize,
    id: String,
    name: String,
    value: f64,
}

/// Run the main application event loop
pub async fn run(terminal: &mut Tui, app: &mut App) -> Result<()> {
    // Configure event poll timeout (ms)
    const EVENT_POLL_TIMEOUT: u64 = 16;

    let size = terminal.size()?;
    app.resize(size.width, size.height);

    let mut loader = DatasetLoader::new();
    loader.start(&app.config, &app.registry);

    while app.running {
        app.update();
        loader.poll(app).await;

        if let Err(e) = terminal.draw(|f| ui::ui(app, f)) {
            return Err(color_eyre::eyre::eyre!("Terminal draw error: {e}"));
        }

        if matches!(
            event::poll(std::time::Duration::from_millis(EVENT_POLL_TIMEOUT)),
            Ok(true)
        ) {
            match event::read() {
                Ok(Event::Key(key)) if key.kind != KeyEventKind::Release => {
                    handle_key(app, key);
                }
                Ok(Event::Mouse(mouse)) => handle_mouse(app, mouse),
                Ok(Event::Resize(width, height)) => {
                    log::debug!("Terminal resized to {width}x{height}");
                    app.resize(width, height);
                }
                Ok(_) => {}
                Err(e) => log::warn!("Failed to read terminal event: {e}"),
            }
        }
    }

    log::info!("Event loop finished");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use skimap::data::{DatasetSource, EmbeddedSource};

    #[test]
    fn ranking_is_descending_and_complete() {
        let registry = ResortRegistry::builtin();
        let loaded = LoadedDataset {
            dataset: EmbeddedSource.load().expect("embedded table"),
            origin: DatasetOrigin::Embedded,
            error: None,
        };

        let ranking = build_ranking(&registry, &loaded, Month::January, Week::First);
        assert_eq!(ranking.resorts.len(), registry.len());
        assert_eq!(ranking.resorts[0].rank, 1);
        assert!(ranking
            .resorts
            .windows(2)
            .all(|pair| pair[0].value >= pair[1].value));

        let json = serde_json::to_value(&ranking).expect("serialises");
        assert_eq!(json["origin"], "embedded");
        assert_eq!(json["week"], "Week 1");
        assert!(json["generated_at"].as_str().is_some());
    }

    #[tokio::test]
    async fn loader_delivers_dataset_to_app() {
        let mut app = App::new(AppConfig::default());
        let mut loader = DatasetLoader::new();
        loader.start(&app.config, &app.registry);
        assert_eq!(loader.state, LoadState::Loading);

        for _ in 0..200 {
            loader.poll(&mut app).await;
            if loader.state == LoadState::Ready {
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        }

        assert_eq!(loader.state, LoadState::Ready);
        assert!(!app.is_loading());
        assert_eq!(
            app.loaded.as_ref().map(|loaded| loaded.origin),
            Some(DatasetOrigin::Embedded)
        );
    }
}
