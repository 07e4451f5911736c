//! Widget-level configuration constants.

// Timing
pub const TICK_INTERVAL_MS: u32 = 1_000;

// Limits for the seconds input
pub const MIN_TIMER_SECONDS: u32 = 0;
pub const MAX_TIMER_SECONDS: u32 = 3_600;

// Labels
pub const IDLE_DISPLAY: &str = "00:00";
pub const CALL_LABEL: &str = "Call Patient";
pub const RECALL_LABEL: &str = "Recall";
pub const CANCEL_LABEL: &str = "Cancel";
pub const NEXT_PATIENT_LABEL: &str = "Next Patient";
pub const SECONDS_INPUT_LABEL: &str = "Time in seconds:";
pub const SECONDS_INPUT_TITLE: &str = "Max 3600";

// Name of the window event used by pages that listen globally
pub const CALLING_PATIENT_EVENT: &str = "calling-patient";

// CSS state modifiers, see static/call_patient.css
pub const INFO_DISABLED_CLASS: &str = "CardQueue__Info--disabled";
pub const INFO_ANIMATION_CLASS: &str = "CardQueue__Info--animation";

// Reception desk
pub const MAX_BOARD_ENTRIES: usize = 10;
pub const DESK_ROOT_ID: &str = "desk";
