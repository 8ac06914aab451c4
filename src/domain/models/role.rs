#[derive(Copy, Clone, Debug, PartialEq, Eq, strum::Display)]
pub enum Role {
    #[strum(serialize = "You")]
    User,
    #[strum(serialize = "Assistant")]
    Assistant,
}
