use super::*;

mod bulk_import;
mod import;
mod library_check;
