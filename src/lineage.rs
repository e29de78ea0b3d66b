//! Parent checkpoint links for incremental checkpoints.

use crate::digest::Digest;
use crate::error::Result;
use crate::request::CheckpointRequest;

/// Record `digest` as the checkpoint `request` is derived from.
///
/// The string is stored verbatim once it parses as a digest. Whether the
/// parent actually exists is left to the runtime.
pub fn attach_parent(request: &mut CheckpointRequest, digest: &str) -> Result<()> {
    set_parent(request, Digest::parse(digest)?);
    Ok(())
}

/// Link `request` to an already parsed parent, replacing any earlier link.
///
/// The options payload is left as it is.
pub fn set_parent(request: &mut CheckpointRequest, digest: Digest) {
    request.parent_checkpoint = Some(digest);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::request::Mutator;
    use crate::runtime::RuntimeVariant;

    #[test]
    fn test_attach_parent_stores_exact_value() {
        let digest = "sha256:abc1230000000000000000000000000000000000000000000000000000000000";
        let mut req = CheckpointRequest::new();
        attach_parent(&mut req, digest).unwrap();
        assert_eq!(req.parent_checkpoint.as_ref().unwrap().as_str(), digest);
        assert!(req.options.is_none());
    }

    #[test]
    fn test_attach_parent_replaces_previous_link() {
        let first = "sha256:1111111111111111111111111111111111111111111111111111111111111111";
        let second = "sha256:2222222222222222222222222222222222222222222222222222222222222222";
        let mut req = CheckpointRequest::new();
        attach_parent(&mut req, first).unwrap();
        attach_parent(&mut req, second).unwrap();
        assert_eq!(req.parent_checkpoint.unwrap().as_str(), second);
    }

    #[test]
    fn test_attach_parent_reports_digest_errors() {
        let mut req = CheckpointRequest::new();
        let err = attach_parent(&mut req, "sha256:zz").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Input);
        assert!(req.parent_checkpoint.is_none());
    }

    #[test]
    fn test_parent_mutator_links_through_set_parent() {
        let digest = Digest::from_sha256_bytes(b"parent");
        let mut req = crate::request::build([Mutator::SetExit], RuntimeVariant::RuncV1).unwrap();
        let options = req.options.clone();

        Mutator::SetParent(digest.clone())
            .apply(&mut req, RuntimeVariant::RuncV1)
            .unwrap();
        assert_eq!(req.parent_checkpoint, Some(digest));
        assert_eq!(req.options, options);
    }
}
