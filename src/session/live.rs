//! Live Session
//!
//! One dashboard instance: its own history, generator and view subscribers,
//! wired to the outbound channel of a single WebSocket connection. Built when
//! the connection opens and dropped when it closes.

use tokio::sync::mpsc;

use super::messages::ServerMessage;
use super::registry::SessionId;
use crate::config::Config;
use crate::dashboard::{
    DashboardError, DashboardResult, HistoryBuffer, NotifyReport, ReadingGenerator, Subscriber,
    TemperatureGenerator, ViewModel,
};
use crate::views::{default_views, View};

/// Binds one view to a session's outbound channel
///
/// Pushes a fragment only when it differs from the last one pushed, so an
/// unchanged view costs a render but no traffic.
pub struct ViewSubscriber {
    view: Box<dyn View>,
    sink: mpsc::UnboundedSender<ServerMessage>,
    last_html: Option<String>,
}

impl ViewSubscriber {
    pub fn new(view: Box<dyn View>, sink: mpsc::UnboundedSender<ServerMessage>) -> Self {
        Self {
            view,
            sink,
            last_html: None,
        }
    }
}

impl Subscriber for ViewSubscriber {
    fn name(&self) -> &str {
        self.view.id().as_str()
    }

    fn on_change(&mut self, model: &ViewModel) -> DashboardResult<()> {
        let html = self.view.render(model)?;
        if self.last_html.as_deref() == Some(html.as_str()) {
            return Ok(());
        }

        self.sink
            .send(ServerMessage::Render {
                view: self.view.id(),
                version: model.version(),
                html: html.clone(),
            })
            .map_err(|_| DashboardError::SessionClosed)?;

        self.last_html = Some(html);
        Ok(())
    }

    fn invalidate(&mut self) {
        self.last_html = None;
    }
}

/// Per-connection dashboard state
pub struct LiveSession {
    id: SessionId,
    history: HistoryBuffer,
    generator: Box<dyn ReadingGenerator>,
}

impl LiveSession {
    /// Create a session with an explicit generator and set of views
    pub fn new(
        id: SessionId,
        history_size: usize,
        generator: Box<dyn ReadingGenerator>,
        views: Vec<Box<dyn View>>,
        sink: mpsc::UnboundedSender<ServerMessage>,
    ) -> Self {
        let mut history = HistoryBuffer::new(history_size);
        for view in views {
            history.subscribe(Box::new(ViewSubscriber::new(view, sink.clone())));
        }

        Self {
            id,
            history,
            generator,
        }
    }

    /// Create a session with the simulated sensor and the four standard views
    pub fn from_config(
        id: SessionId,
        config: &Config,
        sink: mpsc::UnboundedSender<ServerMessage>,
    ) -> Self {
        Self::new(
            id,
            config.dashboard.history_size,
            Box::new(TemperatureGenerator::from_config(&config.sensor)),
            default_views(&config.sensor),
            sink,
        )
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn history(&self) -> &HistoryBuffer {
        &self.history
    }

    /// Render every view for the current (possibly empty) state
    pub fn start(&mut self) -> NotifyReport {
        self.history.notify()
    }

    /// Take one reading and propagate it to the views
    ///
    /// On generator failure the history is left untouched and nothing is
    /// rendered.
    pub fn tick(&mut self) -> DashboardResult<NotifyReport> {
        let reading = self.generator.generate()?;

        tracing::debug!(
            session_id = %self.id,
            value = reading.value(),
            timestamp = %reading.formatted_timestamp(),
            "New reading"
        );

        Ok(self.history.append(reading))
    }

    /// Re-send every view, even unchanged ones
    pub fn refresh(&mut self) -> NotifyReport {
        self.history.resync()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SensorConfig;
    use crate::dashboard::Reading;
    use crate::views::ViewId;
    use std::collections::VecDeque;

    /// Replays a fixed list of outcomes
    struct ScriptedGenerator {
        script: VecDeque<DashboardResult<Reading>>,
    }

    impl ScriptedGenerator {
        fn new(script: Vec<DashboardResult<Reading>>) -> Box<Self> {
            Box::new(Self {
                script: script.into(),
            })
        }
    }

    impl ReadingGenerator for ScriptedGenerator {
        fn generate(&mut self) -> DashboardResult<Reading> {
            self.script
                .pop_front()
                .unwrap_or_else(|| Err(DashboardError::GeneratorFailure("script exhausted".into())))
        }
    }

    fn reading(value: f64, second: u32) -> Reading {
        Reading::parse(value, &format!("2024-03-01 08:00:{:02}", second)).unwrap()
    }

    fn session(
        history_size: usize,
        script: Vec<DashboardResult<Reading>>,
    ) -> (LiveSession, mpsc::UnboundedReceiver<ServerMessage>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let session = LiveSession::new(
            "test-session".to_string(),
            history_size,
            ScriptedGenerator::new(script),
            default_views(&SensorConfig::default()),
            tx,
        );
        (session, rx)
    }

    fn drain(rx: &mut mpsc::UnboundedReceiver<ServerMessage>) -> Vec<(ViewId, u64, String)> {
        let mut out = Vec::new();
        while let Ok(msg) = rx.try_recv() {
            if let ServerMessage::Render {
                view,
                version,
                html,
            } = msg
            {
                out.push((view, version, html));
            }
        }
        out
    }

    #[test]
    fn test_start_renders_placeholders() {
        let (mut session, mut rx) = session(5, Vec::new());

        let report = session.start();
        assert_eq!(report.delivered, 4);

        let renders = drain(&mut rx);
        let views: Vec<ViewId> = renders.iter().map(|(v, _, _)| *v).collect();
        assert_eq!(views, ViewId::all());
        for (_, version, html) in &renders {
            assert_eq!(*version, 0);
            assert!(html.contains("placeholder"));
        }
    }

    #[test]
    fn test_tick_updates_every_view() {
        let (mut session, mut rx) = session(5, vec![Ok(reading(-17.2, 1))]);
        session.start();
        drain(&mut rx);

        let report = session.tick().unwrap();
        assert_eq!(report.delivered, 4);

        let renders = drain(&mut rx);
        assert_eq!(renders.len(), 4);
        for (_, version, _) in &renders {
            assert_eq!(*version, 1);
        }
        let current = renders
            .iter()
            .find(|(v, _, _)| *v == ViewId::CurrentValue)
            .unwrap();
        assert!(current.2.contains("-17.2 C"));
    }

    #[test]
    fn test_seven_ticks_keep_last_five() {
        let script: Vec<_> = (1..=7).map(|n| Ok(reading(-18.0 + n as f64 * 0.2, n))).collect();
        let (mut session, _rx) = session(5, script);

        for _ in 0..7 {
            session.tick().unwrap();
        }

        let snapshot = session.history().snapshot();
        let seconds: Vec<u32> = snapshot
            .readings()
            .iter()
            .map(|r| chrono::Timelike::second(&r.timestamp()))
            .collect();
        assert_eq!(seconds, vec![3, 4, 5, 6, 7]);
    }

    #[test]
    fn test_generator_failure_keeps_prior_state() {
        let (mut session, mut rx) = session(
            5,
            vec![
                Ok(reading(-17.2, 1)),
                Err(DashboardError::GeneratorFailure("sensor offline".into())),
                Ok(reading(-16.8, 3)),
            ],
        );

        session.tick().unwrap();
        drain(&mut rx);

        let result = session.tick();
        assert!(matches!(result, Err(DashboardError::GeneratorFailure(_))));
        assert_eq!(session.history().len(), 1);
        assert!(drain(&mut rx).is_empty());

        // The next tick proceeds normally
        session.tick().unwrap();
        assert_eq!(session.history().len(), 2);
        assert_eq!(drain(&mut rx).len(), 4);
    }

    #[test]
    fn test_unchanged_views_are_not_resent() {
        // Capacity 1 and an identical reading: nothing visible changes
        let (mut session, mut rx) = session(1, vec![Ok(reading(-17.0, 1)), Ok(reading(-17.0, 1))]);

        session.tick().unwrap();
        assert_eq!(drain(&mut rx).len(), 4);

        session.tick().unwrap();
        assert!(drain(&mut rx).is_empty());
        assert_eq!(session.history().version(), 2);
    }

    #[test]
    fn test_refresh_resends_everything() {
        let (mut session, mut rx) = session(5, vec![Ok(reading(-17.0, 1))]);
        session.tick().unwrap();
        drain(&mut rx);

        session.start();
        assert!(drain(&mut rx).is_empty());

        session.refresh();
        assert_eq!(drain(&mut rx).len(), 4);
    }

    #[test]
    fn test_closed_sink_does_not_break_tick() {
        let (mut session, rx) = session(5, vec![Ok(reading(-17.0, 1))]);
        drop(rx);

        let report = session.tick().unwrap();
        assert_eq!(report.failed, 4);
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn test_from_config() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut session = LiveSession::from_config("cfg".to_string(), &Config::default(), tx);

        assert_eq!(session.id(), "cfg");
        assert_eq!(session.history().capacity(), 5);

        session.tick().unwrap();
        assert_eq!(drain(&mut rx).len(), 4);
    }
}
