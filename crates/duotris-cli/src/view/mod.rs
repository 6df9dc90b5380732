pub(crate) mod widgets;
