//! Logging shims for the host-testable library.
//!
//! Forward to `defmt` when the `defmt` feature is on. Otherwise the
//! arguments are only borrowed, so host tests need no global logger.

macro_rules! info {
    ( $fmt:literal $(, $arg:expr)* $(,)? ) => {{
        #[cfg(feature = "defmt")]
        defmt::info!($fmt $(, $arg)*);
        #[cfg(not(feature = "defmt"))]
        {
            $( let _ = &$arg; )*
        }
    }};
}

macro_rules! debug {
    ( $fmt:literal $(, $arg:expr)* $(,)? ) => {{
        #[cfg(feature = "defmt")]
        defmt::debug!($fmt $(, $arg)*);
        #[cfg(not(feature = "defmt"))]
        {
            $( let _ = &$arg; )*
        }
    }};
}

// Not `warn`: that name collides with the built-in lint attribute.
macro_rules! warning {
    ( $fmt:literal $(, $arg:expr)* $(,)? ) => {{
        #[cfg(feature = "defmt")]
        defmt::warn!($fmt $(, $arg)*);
        #[cfg(not(feature = "defmt"))]
        {
            $( let _ = &$arg; )*
        }
    }};
}

pub(crate) use debug;
pub(crate) use info;
pub(crate) use warning;

#[cfg(test)]
mod tests {
    #[test]
    fn arguments_are_borrowed_not_moved() {
        let name = String::from("A1");
        let pressed = true;
        info!("Location: {}", name);
        debug!("Queue {} for slave", name);
        warning!("Remote link lost: {}", pressed);
        assert_eq!(name, "A1");
        assert!(pressed);
    }
}
