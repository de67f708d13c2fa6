/// Defines the directory where the simulation result files are saved
pub const DEFAULT_OUT_DIR: &str = "/tmp/ipsim/results";

/// Defines an auxiliary directory where the test result files are saved
pub const DEFAULT_TEST_DIR: &str = "/tmp/ipsim/test";

/// Defines the default gravity acceleration (m/s²)
pub const DEFAULT_GRAVITY: f64 = 9.8;

/// Defines the default angle (degrees) between the gravity vector and the z axis
///
/// The value 180 means that gravity points down along z.
pub const DEFAULT_GRAVITY_ANGLE: f64 = 180.0;

/// Defines the number of header lines of a pore file
pub const PORE_FILE_HEADER_LINES: usize = 8;

/// Defines the number of header lines of a throat file
pub const THROAT_FILE_HEADER_LINES: usize = 5;
