mod method;
mod version;

pub use self::method::Method;
pub use self::version::Version;
