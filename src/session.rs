//! Scripted demo game: a timeline of the calls a real game would make.

use clap::ValueEnum;
use ns_ir::GameEvent;
use ns_master::EngineHandle;

/// Time spent on the menu before the game starts.
const MENU_SECONDS: f64 = 1.5;
/// Silence left after the final event.
const TAIL_SECONDS: f64 = 1.0;
/// Starting and fastest move interval.
const FIRST_MOVE: f64 = 0.2;
const FASTEST_MOVE: f64 = 0.09;

/// How the demo game ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Ending {
    Win,
    Crash,
    Bite,
    Starved,
}

/// One scheduled call into the engine.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Action {
    Theme(f64),
    Gameplay(bool),
    Event(GameEvent),
}

/// An action at a point in session time (seconds).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cue {
    pub at: f64,
    pub action: Action,
}

/// Build a session of roughly `seconds` length in the key of `hue`.
pub fn demo_script(seconds: f64, hue: f64, ending: Ending) -> Vec<Cue> {
    let mut cues = vec![
        Cue { at: 0.0, action: Action::Theme(hue) },
        Cue { at: 0.0, action: Action::Gameplay(false) },
        Cue { at: MENU_SECONDS, action: Action::Gameplay(true) },
    ];

    let end = (seconds - TAIL_SECONDS).max(MENU_SECONDS);
    let mut t = MENU_SECONDS;
    let mut moves = 0u32;
    while t < end {
        let interval = (FIRST_MOVE - moves as f64 * 0.0015).max(FASTEST_MOVE);
        let mut push = |event| cues.push(Cue { at: t, action: Action::Event(event) });

        push(GameEvent::MoveTick { speed: interval });
        if moves % 7 == 3 {
            push(GameEvent::Turn { combo: (moves / 7) % 4 + 1 });
        }
        if moves % 25 == 24 {
            push(GameEvent::Food);
        }
        if moves % 90 == 89 {
            push(GameEvent::SpecialFood);
        }

        t += interval;
        moves += 1;
    }

    let finale = match ending {
        Ending::Win => GameEvent::Win,
        Ending::Crash => GameEvent::WallCrash,
        Ending::Bite => GameEvent::SelfBite,
        Ending::Starved => GameEvent::Starved,
    };
    cues.push(Cue { at: end, action: Action::Event(finale) });
    cues.push(Cue { at: end + 0.5, action: Action::Gameplay(false) });
    cues
}

/// Perform one cue.
pub fn apply(handle: &EngineHandle, action: Action) {
    match action {
        Action::Theme(hue) => handle.set_theme_hue(hue),
        Action::Gameplay(on) => handle.set_gameplay_mode(on),
        Action::Event(event) => handle.trigger(event),
    }
}
