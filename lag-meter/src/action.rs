use strum::Display;

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum Action {
    Frame,
    Resize(u16, u16),
    Suspend,
    Resume,
    Quit,
}
