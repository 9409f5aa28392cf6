use tokio::sync::{broadcast, mpsc, oneshot};
use tracing::{debug, info};

use crate::{
    arrangement::Arrangement,
    core::store::{ArrangementRegister, GroupedArrangements, RegisterSnapshotV1},
    types::{DateKey, Position, TimeKey},
};

use super::events::RegisterEvent;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    ChannelClosed,
}

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub command_queue_bound: usize,
    pub event_queue_bound: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            command_queue_bound: 256,
            event_queue_bound: 1024,
        }
    }
}

pub struct RegisterHandle {
    cmd_tx: mpsc::Sender<Command>,
    events_tx: broadcast::Sender<RegisterEvent>,
}

impl Clone for RegisterHandle {
    fn clone(&self) -> Self {
        Self {
            cmd_tx: self.cmd_tx.clone(),
            events_tx: self.events_tx.clone(),
        }
    }
}

enum Command {
    Add {
        arrangement: Arrangement,
        resp: oneshot::Sender<Position>,
    },
    AtPlace {
        place: String,
        resp: oneshot::Sender<Vec<Arrangement>>,
    },
    OnDate {
        date: DateKey,
        resp: oneshot::Sender<Vec<Arrangement>>,
    },
    BetweenTimes {
        date1: DateKey,
        time1: TimeKey,
        date2: DateKey,
        time2: TimeKey,
        resp: oneshot::Sender<Vec<Arrangement>>,
    },
    BetweenDates {
        date1: DateKey,
        date2: DateKey,
        resp: oneshot::Sender<Vec<Arrangement>>,
    },
    Group {
        place: String,
        kind: String,
        resp: oneshot::Sender<Vec<Arrangement>>,
    },
    GroupedAndSorted {
        resp: oneshot::Sender<GroupedArrangements>,
    },
    Len {
        resp: oneshot::Sender<usize>,
    },
    Snapshot {
        resp: oneshot::Sender<RegisterSnapshotV1>,
    },
    Shutdown {
        resp: oneshot::Sender<()>,
    },
}

pub fn spawn_register(register: ArrangementRegister, config: RuntimeConfig) -> RegisterHandle {
    let (cmd_tx, mut cmd_rx) = mpsc::channel::<Command>(config.command_queue_bound);
    let (events_tx, _) = broadcast::channel::<RegisterEvent>(config.event_queue_bound);

    let events_tx_loop = events_tx.clone();

    tokio::spawn(async move {
        let mut register = register;
        info!(records = register.len(), "register runtime started");

        while let Some(cmd) = cmd_rx.recv().await {
            if handle_command(cmd, &mut register, &events_tx_loop) {
                break;
            }
        }

        info!(records = register.len(), "register runtime stopped");
    });

    RegisterHandle { cmd_tx, events_tx }
}

impl RegisterHandle {
    pub fn subscribe(&self) -> broadcast::Receiver<RegisterEvent> {
        self.events_tx.subscribe()
    }

    pub async fn add(&self, arrangement: Arrangement) -> Result<Position, RuntimeError> {
        self.request(|resp| Command::Add { arrangement, resp }).await
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn add_new(
        &self,
        id: crate::types::ArrangementId,
        date: DateKey,
        time: TimeKey,
        name: impl Into<String>,
        place: impl Into<String>,
        host: impl Into<String>,
        kind: impl Into<String>,
    ) -> Result<Position, RuntimeError> {
        self.add(Arrangement::new(id, date, time, name, place, host, kind))
            .await
    }

    pub async fn at_place(&self, place: impl Into<String>) -> Result<Vec<Arrangement>, RuntimeError> {
        let place = place.into();
        self.request(|resp| Command::AtPlace { place, resp }).await
    }

    pub async fn on_date(&self, date: DateKey) -> Result<Vec<Arrangement>, RuntimeError> {
        self.request(|resp| Command::OnDate { date, resp }).await
    }

    pub async fn between_times(
        &self,
        date1: DateKey,
        time1: TimeKey,
        date2: DateKey,
        time2: TimeKey,
    ) -> Result<Vec<Arrangement>, RuntimeError> {
        self.request(|resp| Command::BetweenTimes {
            date1,
            time1,
            date2,
            time2,
            resp,
        })
        .await
    }

    pub async fn between_dates(&self, date1: DateKey, date2: DateKey) -> Result<Vec<Arrangement>, RuntimeError> {
        self.request(|resp| Command::BetweenDates { date1, date2, resp })
            .await
    }

    pub async fn group(
        &self,
        place: impl Into<String>,
        kind: impl Into<String>,
    ) -> Result<Vec<Arrangement>, RuntimeError> {
        let (place, kind) = (place.into(), kind.into());
        self.request(|resp| Command::Group { place, kind, resp }).await
    }

    pub async fn grouped_and_sorted(&self) -> Result<GroupedArrangements, RuntimeError> {
        self.request(|resp| Command::GroupedAndSorted { resp }).await
    }

    pub async fn len(&self) -> Result<usize, RuntimeError> {
        self.request(|resp| Command::Len { resp }).await
    }

    pub async fn snapshot(&self) -> Result<RegisterSnapshotV1, RuntimeError> {
        self.request(|resp| Command::Snapshot { resp }).await
    }

    pub async fn shutdown(&self) -> Result<(), RuntimeError> {
        self.request(|resp| Command::Shutdown { resp }).await
    }

    async fn request<T>(&self, make: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(make(tx))
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)
    }
}

fn handle_command(
    cmd: Command,
    register: &mut ArrangementRegister,
    events_tx: &broadcast::Sender<RegisterEvent>,
) -> bool {
    match cmd {
        Command::Add { arrangement, resp } => {
            let id = arrangement.id();
            let position = register.add(arrangement);
            debug!(id, position, "add applied");
            let _ = events_tx.send(RegisterEvent::Added { id, position });
            let _ = resp.send(position);
        }
        Command::AtPlace { place, resp } => {
            let _ = resp.send(register.at_place_cloned(&place));
        }
        Command::OnDate { date, resp } => {
            let _ = resp.send(register.on_date_cloned(date));
        }
        Command::BetweenTimes {
            date1,
            time1,
            date2,
            time2,
            resp,
        } => {
            let _ = resp.send(register.between_times_cloned(date1, time1, date2, time2));
        }
        Command::BetweenDates { date1, date2, resp } => {
            let _ = resp.send(register.between_dates_cloned(date1, date2));
        }
        Command::Group { place, kind, resp } => {
            let _ = resp.send(register.group_cloned(&place, &kind));
        }
        Command::GroupedAndSorted { resp } => {
            let _ = resp.send(register.grouped_and_sorted());
        }
        Command::Len { resp } => {
            let _ = resp.send(register.len());
        }
        Command::Snapshot { resp } => {
            let _ = resp.send(register.export_snapshot());
        }
        Command::Shutdown { resp } => {
            let _ = resp.send(());
            return true;
        }
    }

    false
}
