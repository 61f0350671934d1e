/// Things the user can ask for while the simulation runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Stop or resume ticking
    TogglePause,

    /// Exit the application
    Exit,
}
