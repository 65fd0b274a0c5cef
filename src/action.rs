#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,
    ToggleSort,
    EnterKillInput,
    KillInputChar(char),
    KillInputBackspace,
    SubmitKill,
    CancelKill,
    EnterSelfTest,
    LeaveSelfTest,
    None,
}
