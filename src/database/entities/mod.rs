pub mod enums;
pub mod module_prerequisites;
pub mod modules;
pub mod path_modules;
pub mod paths;
pub mod sections;
pub mod sources;
pub mod tags;
pub mod theme_relations;
pub mod themes;

pub use enums::*;

use sea_orm::{ActiveValue::Set, prelude::ChronoDateTimeUtc};

/// Audit columns stamped on insert and update, never taken from the client
pub trait Auditable {
    fn stamp_created(&mut self, by: Option<String>, at: ChronoDateTimeUtc);
    fn stamp_modified(&mut self, by: Option<String>, at: ChronoDateTimeUtc);
}

macro_rules! impl_auditable {
    ($($entity:ident),+ $(,)?) => {
        $(
            impl Auditable for $entity::ActiveModel {
                fn stamp_created(&mut self, by: Option<String>, at: ChronoDateTimeUtc) {
                    self.created = Set(at);
                    self.created_by = Set(by);
                }

                fn stamp_modified(&mut self, by: Option<String>, at: ChronoDateTimeUtc) {
                    self.last_modified = Set(Some(at));
                    self.last_modified_by = Set(by);
                }
            }
        )+
    };
}

impl_auditable!(paths, modules, sections, themes, sources);

// Tags are immutable once created.
impl Auditable for tags::ActiveModel {
    fn stamp_created(&mut self, by: Option<String>, at: ChronoDateTimeUtc) {
        self.created = Set(at);
        self.created_by = Set(by);
    }

    fn stamp_modified(&mut self, _by: Option<String>, _at: ChronoDateTimeUtc) {}
}
