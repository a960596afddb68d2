mod session;
mod space;

pub use session::Session;
pub use space::Space;

/// Common surface for records held in a collection store.
pub trait Record {
    fn id(&self) -> &str;
}

impl Record for Space {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Session {
    fn id(&self) -> &str {
        &self.id
    }
}
