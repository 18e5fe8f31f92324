//! Cohort backend over a real MPI runtime.
//!
//! The C shim in `mpi.c` is compiled and linked by the build script when
//! the `mpi` feature is enabled. Run the resulting binary under the MPI
//! launcher, e.g. `mpiexec -n 4 nnfprobe /mnt/nnf`.

use super::comm::Cohort;

extern "C" {
    fn cohort_init() -> i32;
    fn cohort_finalize();
    fn cohort_rank() -> i32;
    fn cohort_size() -> i32;
    fn cohort_processor_name(buf: *mut u8, len: *mut i32);
}

/// At most `MPI_MAX_PROCESSOR_NAME` for any known MPI implementation.
const PROCESSOR_NAME_CAPACITY: usize = 256;

/// An initialized MPI environment. Only one instance may exist per
/// process; the runtime is finalized when the value is dropped, after
/// which no further instance can be created.
pub struct MpiCohort {
    rank: usize,
    size: usize,
    processor_name: String,
}

impl MpiCohort {
    /// Initializes the MPI runtime and captures this process's identity.
    /// Returns `None` when initialization fails, allowing the caller to
    /// fall back to another backend.
    pub fn init() -> Option<Self> {
        unsafe {
            if cohort_init() != 0 {
                return None;
            }
            let rank = cohort_rank().max(0) as usize;
            let size = cohort_size().max(1) as usize;
            let mut buf = [0u8; PROCESSOR_NAME_CAPACITY];
            let mut len: i32 = 0;
            cohort_processor_name(buf.as_mut_ptr(), &mut len);
            let len = (len.max(0) as usize).min(buf.len());
            let processor_name = String::from_utf8_lossy(&buf[..len]).into_owned();
            Some(Self {
                rank,
                size,
                processor_name,
            })
        }
    }
}

impl Cohort for MpiCohort {
    fn rank(&self) -> usize {
        self.rank
    }

    fn size(&self) -> usize {
        self.size
    }

    fn processor_name(&self) -> String {
        self.processor_name.clone()
    }
}

impl Drop for MpiCohort {
    fn drop(&mut self) {
        unsafe { cohort_finalize() }
    }
}
