//! Logging macros.
//!
//! Forward to `defmt` when the `defmt` feature is enabled, print to stdout in
//! host unit tests, and compile to nothing otherwise.

macro_rules! log_debug {
  ($($arg:tt)*) => {{
    #[cfg(feature = "defmt")]
    ::defmt::debug!($($arg)*);

    #[cfg(all(not(feature = "defmt"), test))]
    std::println!("[DEBUG] {}", std::format!($($arg)*));

    #[cfg(all(not(feature = "defmt"), not(test)))]
    let _ = ::core::format_args!($($arg)*);
  }};
}

macro_rules! log_info {
  ($($arg:tt)*) => {{
    #[cfg(feature = "defmt")]
    ::defmt::info!($($arg)*);

    #[cfg(all(not(feature = "defmt"), test))]
    std::println!("[INFO] {}", std::format!($($arg)*));

    #[cfg(all(not(feature = "defmt"), not(test)))]
    let _ = ::core::format_args!($($arg)*);
  }};
}

macro_rules! log_warn {
  ($($arg:tt)*) => {{
    #[cfg(feature = "defmt")]
    ::defmt::warn!($($arg)*);

    #[cfg(all(not(feature = "defmt"), test))]
    std::println!("[WARN] {}", std::format!($($arg)*));

    #[cfg(all(not(feature = "defmt"), not(test)))]
    let _ = ::core::format_args!($($arg)*);
  }};
}
