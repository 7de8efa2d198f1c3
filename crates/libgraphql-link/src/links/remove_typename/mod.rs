mod keep_typename;
mod remove_typename_link;


pub use keep_typename::KeepTypename;
pub use remove_typename_link::RemoveTypenameFromVariablesLink;
pub use remove_typename_link::strip_typename;
