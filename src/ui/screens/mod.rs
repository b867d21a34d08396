pub(crate) mod finance;
pub(crate) mod goals;
pub(crate) mod savings;
