#[derive(Debug, PartialEq, Clone, Copy)]
pub enum RouletteState {
    Idle,      // Waiting for the start button
    Animating, // Flicker in flight, start button locked
    Exhausted, // Every image drawn, next press ends the app
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum TriggerOutcome {
    Started,
    Ignored,
    Exhausted,
}
