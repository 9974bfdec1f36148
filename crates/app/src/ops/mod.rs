pub mod delay;
pub mod digest;
pub mod keypair;
pub mod sign;
pub mod verify;
pub mod version;

pub use delay::Delay;
pub use digest::Digest;
pub use keypair::Keypair;
pub use sign::Sign;
pub use verify::Verify;
pub use version::Version;
