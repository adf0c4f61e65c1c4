use serde::Serialize;
use std::sync::Mutex;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::domain::destination::Destination;
use crate::use_cases::toggle::{Carousel, DestinationToggle};

#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct Testimonial {
    pub name: &'static str,
    pub location: &'static str,
    pub rating: u8,
    pub quote: &'static str,
}

pub static TESTIMONIALS: [Testimonial; 5] = [
    Testimonial {
        name: "María González",
        location: "San José, Costa Rica",
        rating: 5,
        quote: "Una experiencia transformadora. El equilibrio perfecto entre lujo y sostenibilidad.",
    },
    Testimonial {
        name: "David Johnson",
        location: "Miami, USA",
        rating: 5,
        quote: "Jamás pensé que podría disfrutar tanto del confort en medio de la naturaleza virgen.",
    },
    Testimonial {
        name: "Ana Rodríguez",
        location: "Barcelona, España",
        rating: 5,
        quote: "Los domos geodésicos son impresionantes. Una arquitectura que respeta el entorno.",
    },
    Testimonial {
        name: "Carlos Mendoza",
        location: "Medellín, Colombia",
        rating: 5,
        quote: "El servicio excepcional y la consciencia ambiental hacen de Auralta algo único.",
    },
    Testimonial {
        name: "Sophie Martin",
        location: "París, Francia",
        rating: 5,
        quote: "Une expérience magique dans un cadre préservé. Highly recommended!",
    },
];

// Periodic task that lives exactly as long as its handle.
#[derive(Debug)]
pub struct RotationTask {
    handle: Option<JoinHandle<()>>,
}

impl RotationTask {
    // A zero period never starts a task. Must be called inside a tokio runtime.
    pub fn spawn<F>(period: Duration, mut tick: F) -> Self
    where
        F: FnMut() + Send + 'static,
    {
        if period.is_zero() {
            return Self { handle: None };
        }

        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // The first tick completes immediately.
            interval.tick().await;
            loop {
                interval.tick().await;
                tick();
            }
        });

        Self {
            handle: Some(handle),
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

impl Drop for RotationTask {
    fn drop(&mut self) {
        self.stop();
    }
}

// Rotating page state: featured destination plus the visible testimonial.
#[derive(Debug)]
pub struct Rotation {
    pub toggle: DestinationToggle,
    pub testimonials: Carousel<Testimonial>,
}

#[derive(Debug, Serialize)]
pub struct ShowcaseSnapshot {
    pub destination: Destination,
    pub testimonial_index: usize,
    pub testimonial: Option<&'static Testimonial>,
}

pub struct Showcase {
    tx: watch::Sender<Rotation>,
    tasks: Mutex<Vec<RotationTask>>,
}

impl Showcase {
    pub fn new(initial: Destination) -> Self {
        let (tx, _rx) = watch::channel(Rotation {
            toggle: DestinationToggle::new(initial),
            testimonials: Carousel::new(&TESTIMONIALS),
        });
        Self {
            tx,
            tasks: Mutex::new(Vec::new()),
        }
    }

    // Restarts both rotations; a zero period leaves that rotation manual-only.
    pub fn start(&self, destination_period: Duration, testimonial_period: Duration) {
        let destination_tx = self.tx.clone();
        let destination_task = RotationTask::spawn(destination_period, move || {
            destination_tx.send_modify(|rotation| {
                rotation.toggle.alternate();
            });
        });

        let testimonial_tx = self.tx.clone();
        let testimonial_task = RotationTask::spawn(testimonial_period, move || {
            testimonial_tx.send_modify(|rotation| {
                rotation.testimonials.advance();
            });
        });

        let mut tasks = self.tasks.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        tasks.clear();
        tasks.push(destination_task);
        tasks.push(testimonial_task);
        tracing::debug!(
            destination_ms = destination_period.as_millis() as u64,
            testimonial_ms = testimonial_period.as_millis() as u64,
            "showcase rotation started"
        );
    }

    pub fn stop(&self) {
        let mut tasks = self.tasks.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let stopped = tasks.len();
        tasks.clear();
        if stopped > 0 {
            tracing::debug!(stopped, "showcase rotation stopped");
        }
    }

    pub fn is_rotating(&self) -> bool {
        let tasks = self.tasks.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        tasks.iter().any(RotationTask::is_running)
    }

    pub fn select_destination(&self, destination: Destination) {
        self.tx.send_modify(|rotation| rotation.toggle.select(destination));
    }

    pub fn subscribe(&self) -> watch::Receiver<Rotation> {
        self.tx.subscribe()
    }

    pub fn snapshot(&self) -> ShowcaseSnapshot {
        let rotation = self.tx.borrow();
        ShowcaseSnapshot {
            destination: rotation.toggle.active(),
            testimonial_index: rotation.testimonials.index(),
            testimonial: rotation.testimonials.current(),
        }
    }
}

impl Drop for Showcase {
    fn drop(&mut self) {
        self.stop();
    }
}
