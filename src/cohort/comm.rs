//! The cohort-identity trait and the identity record built from it.

/// Identity queries answered by a message-passing runtime. The runtime
/// resolves all three locally; nothing here blocks on another rank.
pub trait Cohort {
    /// Zero-based identifier of this process within the cohort.
    fn rank(&self) -> usize;

    /// Total number of cooperating processes launched together.
    fn size(&self) -> usize;

    /// Name of the processor this process runs on.
    fn processor_name(&self) -> String;
}

/// A process's identity within its cohort, captured once at startup and
/// immutable for the run. Used for reporting only; storage logic never
/// branches on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessIdentity {
    /// Zero-based rank of this process.
    pub rank: usize,
    /// Cohort size.
    pub size: usize,
    /// Processor name reported by the runtime.
    pub processor_name: String,
    /// System hostname, which can differ from the processor name.
    pub hostname: String,
}

impl ProcessIdentity {
    /// Captures the identity of the calling process from a cohort backend.
    pub fn from_cohort(cohort: &dyn Cohort) -> Self {
        Self {
            rank: cohort.rank(),
            size: cohort.size(),
            processor_name: cohort.processor_name(),
            hostname: hostname(),
        }
    }
}

/// Returns the system hostname as reported by `gethostname(2)`, or
/// `"unknown"` if it cannot be read.
pub fn hostname() -> String {
    #[cfg(unix)]
    {
        let mut buf = [0u8; 256];
        let ret = unsafe { libc::gethostname(buf.as_mut_ptr().cast::<libc::c_char>(), buf.len()) };
        if ret == 0 {
            let end = buf.iter().position(|&b| b == 0).unwrap_or(buf.len());
            if let Ok(name) = std::str::from_utf8(&buf[..end]) {
                return name.to_string();
            }
        }
    }
    String::from("unknown")
}
