use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

use crate::action::Action;
use crate::config::Config;
use crate::layout::DashboardView;
use crate::system::collector::Collector;
use crate::system::cpuinfo::StaticCpuInfo;
use crate::system::snapshot::SystemSnapshot;
use crate::system::source::SysRoot;
use crate::ui::sections::build_view;
use crate::ui::theme::Theme;

/// Data is re-sampled at this period no matter how often the screen redraws.
pub const REFRESH_INTERVAL: Duration = Duration::from_secs(1);

pub struct App {
    pub running: bool,
    pub collector: Collector,
    pub snapshot: SystemSnapshot,
    pub static_info: StaticCpuInfo,
    pub cpu_fields: Vec<String>,
    pub theme: Theme,
    last_refresh: Option<Instant>,
}

impl App {
    pub fn new(root: SysRoot, config: Config) -> Self {
        let collector = Collector::new(root, config.sensors.policy());
        let static_info = collector.static_info();
        Self::with_parts(collector, static_info, config)
    }

    pub fn with_parts(collector: Collector, static_info: StaticCpuInfo, config: Config) -> Self {
        App {
            running: true,
            collector,
            snapshot: SystemSnapshot::default(),
            static_info,
            cpu_fields: config.cpu_info.fields,
            theme: Theme::default(),
            last_refresh: None,
        }
    }

    /// Refreshes when the data clock is due. Returns whether it did.
    pub fn tick(&mut self, now: Instant) -> bool {
        let due = self
            .last_refresh
            .is_none_or(|last| now.saturating_duration_since(last) >= REFRESH_INTERVAL);
        if due {
            self.refresh_data();
            self.last_refresh = Some(now);
        }
        due
    }

    pub fn refresh_data(&mut self) {
        // Built in full before the old snapshot is dropped.
        let snapshot = self.collector.refresh();
        self.snapshot = snapshot;
    }

    pub fn view(&self) -> DashboardView {
        build_view(
            &self.snapshot,
            &self.static_info,
            &self.cpu_fields,
            self.collector.policy(),
        )
    }

    pub fn map_key(&self, key: KeyEvent) -> Action {
        if key.kind != KeyEventKind::Press {
            return Action::None;
        }
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => Action::Quit,
            _ => Action::None,
        }
    }

    pub fn dispatch(&mut self, action: Action) {
        match action {
            Action::Quit => self.running = false,
            Action::None => {}
        }
    }
}
