//! IPv6 zone <-> scope id resolution.
//!
//! A zone is either a decimal scope id ("3") or an interface name ("eth0").
//! Interface names are resolved through the platform on Unix; anything that
//! cannot be resolved maps to scope id 0.

/// Resolve a zone string to an IPv6 scope id.
pub fn scope_id(zone: &str) -> u32 {
    if zone.is_empty() {
        return 0;
    }
    if let Ok(id) = zone.parse::<u32>() {
        return id;
    }
    interface_index(zone).unwrap_or(0)
}

/// Render a scope id as a zone string, preferring the interface name.
pub fn zone_name(scope_id: u32) -> String {
    if scope_id == 0 {
        return String::new();
    }
    interface_name(scope_id).unwrap_or_else(|| scope_id.to_string())
}

#[cfg(unix)]
fn interface_index(name: &str) -> Option<u32> {
    let name = std::ffi::CString::new(name).ok()?;
    // SAFETY: `name` is a valid NUL-terminated string for the duration of the call.
    let index = unsafe { libc::if_nametoindex(name.as_ptr()) };
    (index != 0).then_some(index)
}

#[cfg(not(unix))]
fn interface_index(_name: &str) -> Option<u32> {
    None
}

#[cfg(unix)]
fn interface_name(index: u32) -> Option<String> {
    let mut buf = [0 as libc::c_char; libc::IF_NAMESIZE];
    // SAFETY: `buf` holds IF_NAMESIZE bytes as required by if_indextoname.
    let ptr = unsafe { libc::if_indextoname(index, buf.as_mut_ptr()) };
    if ptr.is_null() {
        return None;
    }
    // SAFETY: on success the buffer holds a NUL-terminated interface name.
    let name = unsafe { std::ffi::CStr::from_ptr(buf.as_ptr()) };
    Some(name.to_string_lossy().into_owned())
}

#[cfg(not(unix))]
fn interface_name(_index: u32) -> Option<String> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_zone_is_scope_zero() {
        assert_eq!(scope_id(""), 0);
        assert_eq!(zone_name(0), "");
    }

    #[test]
    fn numeric_zone_parses_directly() {
        assert_eq!(scope_id("7"), 7);
    }

    #[test]
    fn unknown_interface_name_is_scope_zero() {
        assert_eq!(scope_id("no-such-interface-xyz"), 0);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn loopback_name_round_trips() {
        let index = scope_id("lo");
        if index != 0 {
            assert_eq!(zone_name(index), "lo");
        }
    }
}
