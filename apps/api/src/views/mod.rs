// Dual presentations of the upload state: a read-only summary and an
// editable form. Both are pure projections of the controller's current
// value — neither holds state of its own, so they can never drift apart.

pub mod editor;
pub mod summary;
