//! Call Patient widget: a reception-desk card that counts down and then
//! calls the next patient.
//!
//! The state machine lives here as plain Rust so it can be exercised without
//! a browser; the Yew component in [`widget`] only renders it and drives it
//! with DOM events and a one-second [`gloo_timers::callback::Interval`].

use log::{debug, info, warn};
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;
use yew::{AttrValue, Reducible};

pub mod components;
pub mod config;
pub mod hooks;
pub mod interop;
pub mod utils;
pub mod widget;

use config::{CALL_LABEL, IDLE_DISPLAY, MAX_BOARD_ENTRIES, RECALL_LABEL};
use utils::{normalize_seconds_input, parse_timer_attribute};

/// Minutes and seconds of a countdown, each zero-padded to two digits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClockParts {
    pub minutes: String,
    pub seconds: String,
}

impl fmt::Display for ClockParts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.minutes, self.seconds)
    }
}

/// Split a number of seconds into `MM` and `SS`.
///
/// Minutes are not wrapped at 60, so `3600` renders as `60:00`.
pub fn clock_parts(total_seconds: u32) -> ClockParts {
    ClockParts {
        minutes: format!("{:02}", total_seconds / 60),
        seconds: format!("{:02}", total_seconds % 60),
    }
}

/// Which of the two card lines is highlighted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VisualState {
    /// Timer active, "Next Patient" dimmed.
    #[default]
    Initial,
    /// Timer dimmed, "Next Patient" pulsing.
    Calling,
}

impl VisualState {
    pub fn timer_dimmed(self) -> bool {
        self == VisualState::Calling
    }

    pub fn next_patient_dimmed(self) -> bool {
        self == VisualState::Initial
    }

    pub fn next_patient_pulsing(self) -> bool {
        self == VisualState::Calling
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CallLabel {
    #[default]
    CallPatient,
    Recall,
}

impl CallLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            CallLabel::CallPatient => CALL_LABEL,
            CallLabel::Recall => RECALL_LABEL,
        }
    }
}

impl fmt::Display for CallLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Notification sent to the host when a countdown runs out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallingPatient {
    /// Doctor label at the moment the countdown expired.
    pub doctor: AttrValue,
}

/// Result of a single one-second tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickOutcome {
    /// Value to show on the timer display for this tick.
    pub display: ClockParts,
    /// Set on the tick where the remaining time would drop below zero.
    pub expired: bool,
}

/// One running countdown session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Countdown {
    session: u64,
    remaining: u32,
}

impl Countdown {
    pub fn new(session: u64, seconds: u32) -> Self {
        Self {
            session,
            remaining: seconds,
        }
    }

    pub fn session(&self) -> u64 {
        self.session
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Show the current value, then count down by one second.
    pub fn tick(&mut self) -> TickOutcome {
        let display = clock_parts(self.remaining);
        let expired = match self.remaining.checked_sub(1) {
            Some(next) => {
                self.remaining = next;
                false
            }
            None => true,
        };
        TickOutcome { display, expired }
    }
}

/// Messages that drive a [`PatientCall`].
#[derive(Debug, Clone, PartialEq)]
pub enum CallAction {
    /// Call button pressed.
    Start,
    /// Interval fired for the given session.
    Tick(u64),
    /// Cancel button pressed, or the host wants the card reset.
    Stop,
    /// Seconds input edited.
    Input(String),
    /// Host changed the `doctor` or `timer` attributes.
    Attributes { doctor: AttrValue, timer: AttrValue },
}

/// Full state of one call-patient card.
#[derive(Debug, Clone, PartialEq)]
pub struct PatientCall {
    pub doctor: AttrValue,
    pub seconds_input: String,
    pub display: String,
    pub call_label: CallLabel,
    pub call_disabled: bool,
    pub visual: VisualState,
    /// Number of countdowns that have expired so far.
    pub calls: u64,
    pub last_call: Option<CallingPatient>,
    countdown: Option<Countdown>,
    next_session: u64,
}

impl PatientCall {
    pub fn new(doctor: AttrValue, timer: AttrValue) -> Self {
        Self {
            doctor,
            seconds_input: timer.to_string(),
            display: IDLE_DISPLAY.to_string(),
            call_label: CallLabel::CallPatient,
            call_disabled: false,
            visual: VisualState::Initial,
            calls: 0,
            last_call: None,
            countdown: None,
            next_session: 1,
        }
    }

    /// Id of the running countdown, if any.
    pub fn session(&self) -> Option<u64> {
        self.countdown.as_ref().map(Countdown::session)
    }

    pub fn is_counting_down(&self) -> bool {
        self.countdown.is_some()
    }

    pub fn apply(&mut self, action: CallAction) {
        match action {
            CallAction::Start => self.start_countdown(),
            CallAction::Tick(session) => self.tick(session),
            CallAction::Stop => self.stop_countdown(),
            CallAction::Input(text) => {
                self.seconds_input = normalize_seconds_input(&text).to_string();
            }
            CallAction::Attributes { doctor, timer } => {
                self.doctor = doctor;
                self.seconds_input = timer.to_string();
            }
        }
    }

    fn start_countdown(&mut self) {
        if self.call_disabled || self.countdown.is_some() {
            debug!("Call for {} ignored, countdown already running", self.doctor);
            return;
        }

        let seconds = parse_timer_attribute(&self.seconds_input);
        let session = self.next_session;
        self.next_session += 1;

        self.call_disabled = true;
        self.visual = VisualState::Initial;
        self.countdown = Some(Countdown::new(session, seconds));
        info!(
            "Countdown {} started for {} ({} s)",
            session, self.doctor, seconds
        );
    }

    fn tick(&mut self, session: u64) {
        let Some(countdown) = self.countdown.as_mut() else {
            return;
        };
        if countdown.session() != session {
            debug!("Dropping stale tick for session {}", session);
            return;
        }

        let outcome = countdown.tick();
        self.display = outcome.display.to_string();
        debug!("{} tick: {}", self.doctor, self.display);

        if outcome.expired {
            self.countdown = None;
            self.visual = VisualState::Calling;
            self.call_disabled = false;
            self.call_label = CallLabel::Recall;
            self.calls += 1;
            self.last_call = Some(CallingPatient {
                doctor: self.doctor.clone(),
            });
            info!("Calling next patient for {}", self.doctor);
        }
    }

    fn stop_countdown(&mut self) {
        if let Some(countdown) = self.countdown.take() {
            info!(
                "Countdown {} for {} cancelled with {} s left",
                countdown.session(),
                self.doctor,
                countdown.remaining()
            );
        }
        self.display = IDLE_DISPLAY.to_string();
        self.call_label = CallLabel::CallPatient;
        self.call_disabled = false;
        self.visual = VisualState::Initial;
    }
}

impl Reducible for PatientCall {
    type Action = CallAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        next.apply(action);
        Rc::new(next)
    }
}

/// A call shown on the desk's "now calling" board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardEntry {
    pub doctor: AttrValue,
    /// Wall-clock time of the call, already formatted as `HH:MM`.
    pub at: String,
}

/// Most recent calls across every card on the desk, newest first.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CallBoard {
    pub entries: VecDeque<BoardEntry>,
}

pub struct RecordCall {
    pub call: CallingPatient,
    pub at: String,
}

impl CallBoard {
    pub fn record(&mut self, call: CallingPatient, at: String) {
        self.entries.push_front(BoardEntry {
            doctor: call.doctor,
            at,
        });
        self.entries.truncate(MAX_BOARD_ENTRIES);
    }
}

impl Reducible for CallBoard {
    type Action = RecordCall;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        next.record(action.call, action.at);
        Rc::new(next)
    }
}

/// One doctor's desk as configured in the roster file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeskEntry {
    pub doctor: String,
    pub timer_seconds: u32,
}

#[derive(Debug, serde::Deserialize)]
struct RosterRow {
    doctor: String,
    timer_seconds: String,
}

#[derive(Debug)]
pub enum RosterError {
    Csv(csv::Error),
    /// The file parsed but named no doctors.
    Empty,
}

impl fmt::Display for RosterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RosterError::Csv(e) => write!(f, "Failed to read roster: {}", e),
            RosterError::Empty => write!(f, "Roster does not list any doctors"),
        }
    }
}

impl std::error::Error for RosterError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RosterError::Csv(e) => Some(e),
            RosterError::Empty => None,
        }
    }
}

impl From<csv::Error> for RosterError {
    fn from(e: csv::Error) -> Self {
        RosterError::Csv(e)
    }
}

/// Read `doctor,timer_seconds` rows (with a header line) into desk entries.
///
/// Rows without a doctor are skipped. Timer values go through the same
/// clamping as the seconds input, so a bad value never rejects the file.
pub fn read_roster_from_csv_string(csv_content: &str) -> Result<Vec<DeskEntry>, RosterError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(csv_content.as_bytes());

    let mut roster = Vec::new();
    for (i, row) in reader.deserialize::<RosterRow>().enumerate() {
        let row = row?;
        if row.doctor.is_empty() {
            // +2: header line and 1-based numbering
            warn!("Roster line {} has no doctor, skipping", i + 2);
            continue;
        }
        roster.push(DeskEntry {
            doctor: row.doctor,
            timer_seconds: parse_timer_attribute(&row.timer_seconds),
        });
    }

    if roster.is_empty() {
        return Err(RosterError::Empty);
    }
    info!("Loaded {} desks from roster", roster.len());
    Ok(roster)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(doctor: &'static str, timer: &'static str) -> PatientCall {
        PatientCall::new(AttrValue::Static(doctor), AttrValue::Static(timer))
    }

    fn run_session(state: &mut PatientCall) -> Vec<String> {
        let session = state.session().expect("countdown should be running");
        let mut shown = Vec::new();
        while state.session() == Some(session) {
            state.apply(CallAction::Tick(session));
            shown.push(state.display.clone());
        }
        shown
    }

    #[test]
    fn clock_parts_pads_minutes_and_seconds() {
        assert_eq!(
            clock_parts(65),
            ClockParts {
                minutes: "01".into(),
                seconds: "05".into()
            }
        );
        assert_eq!(clock_parts(0).to_string(), "00:00");
        assert_eq!(clock_parts(59).to_string(), "00:59");
        assert_eq!(clock_parts(600).to_string(), "10:00");
        assert_eq!(clock_parts(3600).to_string(), "60:00");
    }

    #[test]
    fn clock_parts_matches_division_for_whole_range() {
        for s in 0..=3600u32 {
            let parts = clock_parts(s);
            assert_eq!(parts.minutes, format!("{:02}", s / 60));
            assert_eq!(parts.seconds, format!("{:02}", s % 60));
            assert_eq!(parts.minutes.len(), 2);
            assert_eq!(parts.seconds.len(), 2);
        }
    }

    #[test]
    fn countdown_expires_on_the_tick_after_zero_is_shown() {
        let mut countdown = Countdown::new(1, 3);
        let outcomes: Vec<_> = (0..4).map(|_| countdown.tick()).collect();
        let shown: Vec<_> = outcomes.iter().map(|o| o.display.to_string()).collect();
        assert_eq!(shown, vec!["00:03", "00:02", "00:01", "00:00"]);
        assert!(outcomes[..3].iter().all(|o| !o.expired));
        assert!(outcomes[3].expired);
    }

    #[test]
    fn zero_second_countdown_expires_on_first_tick() {
        let mut countdown = Countdown::new(1, 0);
        let outcome = countdown.tick();
        assert_eq!(outcome.display.to_string(), "00:00");
        assert!(outcome.expired);
    }

    #[test]
    fn new_card_is_idle() {
        let state = card("Dr. Grey", "30");
        assert_eq!(state.display, "00:00");
        assert_eq!(state.call_label, CallLabel::CallPatient);
        assert!(!state.call_disabled);
        assert_eq!(state.visual, VisualState::Initial);
        assert_eq!(state.seconds_input, "30");
        assert_eq!(state.session(), None);
    }

    #[test]
    fn start_disables_call_and_keeps_display_until_first_tick() {
        let mut state = card("Dr. Grey", "3");
        state.apply(CallAction::Start);
        assert!(state.call_disabled);
        assert!(state.is_counting_down());
        assert_eq!(state.visual, VisualState::Initial);
        assert_eq!(state.display, "00:00");
    }

    #[test]
    fn full_cycle_shows_each_second_then_calls() {
        let mut state = card("Dr. Grey", "3");
        state.apply(CallAction::Start);
        assert_eq!(run_session(&mut state), vec!["00:03", "00:02", "00:01", "00:00"]);

        assert_eq!(state.visual, VisualState::Calling);
        assert!(!state.call_disabled);
        assert_eq!(state.call_label, CallLabel::Recall);
        assert_eq!(state.call_label.to_string(), "Recall");
        assert_eq!(state.calls, 1);
        assert_eq!(
            state.last_call,
            Some(CallingPatient {
                doctor: AttrValue::Static("Dr. Grey")
            })
        );
    }

    #[test]
    fn ticks_after_expiry_do_not_call_again() {
        let mut state = card("Dr. Grey", "1");
        state.apply(CallAction::Start);
        let session = state.session().unwrap();
        run_session(&mut state);
        assert_eq!(state.calls, 1);

        state.apply(CallAction::Tick(session));
        state.apply(CallAction::Tick(session));
        assert_eq!(state.calls, 1);
        assert_eq!(state.visual, VisualState::Calling);
    }

    #[test]
    fn start_while_running_is_ignored() {
        let mut state = card("Dr. Grey", "5");
        state.apply(CallAction::Start);
        let session = state.session();
        state.apply(CallAction::Tick(session.unwrap()));
        state.apply(CallAction::Start);
        assert_eq!(state.session(), session);
        assert_eq!(state.display, "00:05");
    }

    #[test]
    fn recall_starts_a_fresh_session() {
        let mut state = card("Dr. Grey", "0");
        state.apply(CallAction::Start);
        let first = state.session().unwrap();
        run_session(&mut state);

        state.apply(CallAction::Start);
        let second = state.session().unwrap();
        assert_ne!(first, second);
        assert_eq!(state.visual, VisualState::Initial);

        state.apply(CallAction::Tick(first));
        assert_eq!(state.calls, 1, "stale tick must not advance the new session");
        run_session(&mut state);
        assert_eq!(state.calls, 2);
    }

    #[test]
    fn cancel_while_idle_is_a_reset() {
        let mut state = card("Dr. Grey", "10");
        state.apply(CallAction::Stop);
        state.apply(CallAction::Stop);
        assert_eq!(state.display, "00:00");
        assert!(!state.call_disabled);
        assert_eq!(state.call_label.as_str(), "Call Patient");
        assert_eq!(state.visual, VisualState::Initial);
    }

    #[test]
    fn cancel_stops_countdown_and_clears_recall() {
        let mut state = card("Dr. Grey", "5");
        state.apply(CallAction::Start);
        let session = state.session().unwrap();
        state.apply(CallAction::Tick(session));
        state.apply(CallAction::Stop);

        assert_eq!(state.session(), None);
        assert_eq!(state.display, "00:00");
        state.apply(CallAction::Tick(session));
        assert_eq!(state.display, "00:00");
        assert_eq!(state.calls, 0);

        let mut called = card("Dr. Grey", "0");
        called.apply(CallAction::Start);
        run_session(&mut called);
        called.apply(CallAction::Stop);
        assert_eq!(called.call_label, CallLabel::CallPatient);
        assert_eq!(called.visual, VisualState::Initial);
    }

    #[test]
    fn input_is_normalized() {
        let mut state = card("Dr. Grey", "");
        state.apply(CallAction::Input("-5".into()));
        assert_eq!(state.seconds_input, "5");
        state.apply(CallAction::Input("9999".into()));
        assert_eq!(state.seconds_input, "3600");
    }

    #[test]
    fn doctor_change_keeps_running_countdown() {
        let mut state = card("Dr. Grey", "2");
        state.apply(CallAction::Start);
        let session = state.session().unwrap();
        state.apply(CallAction::Tick(session));

        state.apply(CallAction::Attributes {
            doctor: AttrValue::Static("Dr. Yang"),
            timer: AttrValue::Static("45"),
        });
        assert_eq!(state.doctor.as_str(), "Dr. Yang");
        assert_eq!(state.seconds_input, "45");
        assert_eq!(state.session(), Some(session));

        run_session(&mut state);
        assert_eq!(state.display, "00:00");
        assert_eq!(
            state.last_call.as_ref().map(|c| c.doctor.as_str()),
            Some("Dr. Yang")
        );
    }

    #[test]
    fn visual_state_classes() {
        assert!(VisualState::Initial.next_patient_dimmed());
        assert!(!VisualState::Initial.timer_dimmed());
        assert!(!VisualState::Initial.next_patient_pulsing());
        assert!(VisualState::Calling.timer_dimmed());
        assert!(VisualState::Calling.next_patient_pulsing());
        assert!(!VisualState::Calling.next_patient_dimmed());
    }

    #[test]
    fn board_keeps_newest_first_and_is_bounded() {
        let mut board = CallBoard::default();
        for i in 0..(MAX_BOARD_ENTRIES + 3) {
            board.record(
                CallingPatient {
                    doctor: AttrValue::from(format!("Dr. {}", i)),
                },
                format!("09:{:02}", i),
            );
        }
        assert_eq!(board.entries.len(), MAX_BOARD_ENTRIES);
        let newest = format!("Dr. {}", MAX_BOARD_ENTRIES + 2);
        assert_eq!(board.entries.front().unwrap().doctor.as_str(), newest);
    }

    #[test]
    fn roster_parses_and_normalizes() {
        let csv = "doctor,timer_seconds\n\
                   Dr. Grey, 30\n\
                   , 10\n\
                   Dr. Yang,-20\n\
                   Dr. Shepherd,99999\n";
        let roster = read_roster_from_csv_string(csv).unwrap();
        assert_eq!(
            roster,
            vec![
                DeskEntry {
                    doctor: "Dr. Grey".into(),
                    timer_seconds: 30
                },
                DeskEntry {
                    doctor: "Dr. Yang".into(),
                    timer_seconds: 20
                },
                DeskEntry {
                    doctor: "Dr. Shepherd".into(),
                    timer_seconds: 3600
                },
            ]
        );
    }

    #[test]
    fn roster_without_doctors_is_an_error() {
        let err = read_roster_from_csv_string("doctor,timer_seconds\n").unwrap_err();
        assert!(matches!(err, RosterError::Empty));
        assert!(matches!(
            read_roster_from_csv_string("doctor\nDr. Grey\n"),
            Err(RosterError::Csv(_))
        ));
    }
}
