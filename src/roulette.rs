use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread::{self, JoinHandle};
use log::{debug, info, warn};
use crate::animator::Animator;
use crate::deck::Deck;
use crate::error::{Result, RouletteError};
use crate::state::{RouletteState, TriggerOutcome};

enum WorkerEvent {
    Frame(usize),
    Finished(Result<bool>),
}

/// Start-button state machine driving one background flicker at a time.
///
/// The deck lives here while idle and moves into the worker thread for the
/// duration of a draw; it comes back through the worker's join handle.
pub struct Roulette {
    animator: Animator,
    state: RouletteState,
    deck: Option<Deck>,
    current: usize,
    sender: Sender<WorkerEvent>,
    events: Receiver<WorkerEvent>,
    worker: Option<JoinHandle<Deck>>,
    subscribers: Vec<Sender<usize>>,
}

impl Roulette {
    pub fn new(image_count: usize) -> Result<Self> {
        Self::with_animator(Animator::new(image_count))
    }

    pub fn with_animator(animator: Animator) -> Result<Self> {
        if animator.image_count() == 0 {
            return Err(RouletteError::EmptyImageSet);
        }
        let deck = Deck::new(animator.image_count());
        let (sender, events) = mpsc::channel();

        Ok(Self {
            animator,
            state: RouletteState::Idle,
            deck: Some(deck),
            current: 0,
            sender,
            events,
            worker: None,
            subscribers: Vec::new(),
        })
    }

    pub fn state(&self) -> RouletteState {
        self.state
    }

    /// Index of the image currently on display.
    pub fn current(&self) -> usize {
        self.current
    }

    pub fn is_locked(&self) -> bool {
        self.state == RouletteState::Animating
    }

    /// Registers a listener for display index changes.
    pub fn subscribe(&mut self) -> Receiver<usize> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }

    pub fn trigger(&mut self) -> Result<TriggerOutcome> {
        match self.state {
            RouletteState::Animating => {
                debug!("Trigger ignored, draw already in progress");
                Ok(TriggerOutcome::Ignored)
            }
            RouletteState::Exhausted => {
                info!("All images have been drawn");
                Ok(TriggerOutcome::Exhausted)
            }
            RouletteState::Idle => {
                let mut deck = self.deck.take().ok_or(RouletteError::WorkerLost)?;
                let animator = self.animator.clone();
                let sender = self.sender.clone();

                self.state = RouletteState::Animating;
                self.worker = Some(thread::spawn(move || {
                    let mut rng = rand::rng();
                    let result = animator.play(&mut deck, &mut rng, |index| {
                        // The receiver only goes away with the roulette itself
                        let _ = sender.send(WorkerEvent::Frame(index));
                    });
                    let _ = sender.send(WorkerEvent::Finished(result));
                    deck
                }));

                debug!("Roulette started");
                Ok(TriggerOutcome::Started)
            }
        }
    }

    /// Applies pending worker events. Call once per UI frame.
    pub fn poll(&mut self) -> Result<()> {
        loop {
            match self.events.try_recv() {
                Ok(event) => self.apply(event)?,
                Err(TryRecvError::Empty) => {
                    let worker_done = self.worker.as_ref().is_some_and(|w| w.is_finished());
                    if !worker_done {
                        return Ok(());
                    }
                    // Finished is sent before the thread exits, so it may have
                    // landed between the two checks
                    match self.events.try_recv() {
                        Ok(event) => self.apply(event)?,
                        Err(_) => return Err(self.reap_lost_worker()),
                    }
                }
                Err(TryRecvError::Disconnected) => return Err(RouletteError::WorkerLost),
            }
        }
    }

    fn apply(&mut self, event: WorkerEvent) -> Result<()> {
        match event {
            WorkerEvent::Frame(index) => {
                self.current = index;
                self.subscribers.retain(|s| s.send(index).is_ok());
                Ok(())
            }
            WorkerEvent::Finished(result) => self.finish(result),
        }
    }

    fn finish(&mut self, result: Result<bool>) -> Result<()> {
        let worker = self.worker.take().ok_or(RouletteError::WorkerLost)?;
        let deck = worker.join().map_err(|_| RouletteError::WorkerLost)?;
        let remaining = deck.remaining();
        self.deck = Some(deck);

        match result {
            Ok(false) => {
                info!("Drew image {} ({} left)", self.current, remaining);
                self.state = RouletteState::Idle;
                Ok(())
            }
            Ok(true) => {
                info!("Drew image {}, deck exhausted", self.current);
                self.state = RouletteState::Exhausted;
                Ok(())
            }
            Err(e) => {
                self.state = RouletteState::Idle;
                Err(e)
            }
        }
    }

    fn reap_lost_worker(&mut self) -> RouletteError {
        warn!("Roulette worker exited without finishing its draw");
        if let Some(worker) = self.worker.take() {
            if let Ok(deck) = worker.join() {
                self.deck = Some(deck);
            }
        }
        self.state = RouletteState::Idle;
        RouletteError::WorkerLost
    }
}
