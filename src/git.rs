//! Git remote discovery: which remotes a working copy has, and which
//! `owner/name` repository each of them points at.

mod lookup;
mod remote_url;

pub use self::lookup::{GitCli, LookupError, ORIGIN, RemoteLookup, StaticRemotes, UPSTREAM};
pub use self::remote_url::{
    PUBLIC_HTTPS_PREFIX, RemoteUrlError, RepositoryIdentity, parse_remote_url, short_display_name,
};
