//! A small client for the SEPPmail Cloud portal's REST API.
//!
//! The portal hands out a bearer token in exchange for an API user's credentials;
//! every other endpoint is then reachable with plain GET/POST requests.

pub mod portal;
