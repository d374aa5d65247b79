pub mod card;
pub mod charts;
pub mod fade;
pub mod mountains;
pub mod popup;
