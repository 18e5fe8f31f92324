fn main() {
    #[cfg(feature = "mpi")]
    {
        println!("cargo:rerun-if-changed=src/cohort/mpi.c");
        println!("cargo:rustc-link-lib=mpi");
        cc::Build::new().file("src/cohort/mpi.c").compile("cohort_mpi.a");
    }
}
