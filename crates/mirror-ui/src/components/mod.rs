pub(crate) mod modal;
pub(crate) mod pagination;
pub(crate) mod shell;
pub(crate) mod status;
pub(crate) mod toast;
