// Library root: reference catalogs, the draft-order sequencer, and the
// position wheel / player reveal flow.

pub mod auction;
pub mod catalog;
pub mod draft;
