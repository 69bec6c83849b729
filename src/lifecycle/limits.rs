//! Process file descriptor limit.

use std::io;

/// Soft `RLIMIT_NOFILE` the server asks for at startup.
pub const TARGET_OPEN_FILES: u64 = 20_000;

/// Raise the soft open-file limit toward `target`, capped at the hard limit.
///
/// Never lowers an existing limit. Returns the soft limit now in effect, or
/// `None` on platforms without rlimits.
#[cfg(unix)]
pub fn raise_fd_limit(target: u64) -> io::Result<Option<u64>> {
    let mut limit = libc::rlimit {
        rlim_cur: 0,
        rlim_max: 0,
    };

    // SAFETY: getrlimit only writes into the struct we pass.
    if unsafe { libc::getrlimit(libc::RLIMIT_NOFILE, &mut limit) } != 0 {
        return Err(io::Error::last_os_error());
    }

    let wanted = target as libc::rlim_t;
    let capped = if limit.rlim_max == libc::RLIM_INFINITY {
        wanted
    } else {
        wanted.min(limit.rlim_max)
    };
    if capped <= limit.rlim_cur {
        return Ok(Some(limit.rlim_cur as u64));
    }

    limit.rlim_cur = capped;
    // SAFETY: the struct is fully initialized and outlives the call.
    if unsafe { libc::setrlimit(libc::RLIMIT_NOFILE, &limit) } != 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(Some(capped as u64))
}

#[cfg(not(unix))]
pub fn raise_fd_limit(_target: u64) -> io::Result<Option<u64>> {
    Ok(None)
}
