//! Generated output held as a browser object URL
//!
//! Each tool keeps at most one downloadable output. Replacing or clearing it
//! revokes the previous URL so blobs do not pile up over a long page session.

/// Creates and releases object URLs
pub trait UrlRegistry {
    fn create(&mut self, bytes: &[u8], mime: &str) -> Result<String, String>;
    fn revoke(&mut self, url: &str);
}

/// `URL.createObjectURL` over a `Blob`
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserUrls;

impl UrlRegistry for BrowserUrls {
    fn create(&mut self, bytes: &[u8], mime: &str) -> Result<String, String> {
        let array = js_sys::Uint8Array::new_with_length(bytes.len() as u32);
        array.copy_from(bytes);
        let parts = js_sys::Array::of1(&array);

        let options = web_sys::BlobPropertyBag::new();
        options.set_type(mime);

        let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options)
            .map_err(|e| format!("Failed to create blob: {:?}", e))?;
        web_sys::Url::create_object_url_with_blob(&blob)
            .map_err(|e| format!("Failed to create object URL: {:?}", e))
    }

    fn revoke(&mut self, url: &str) {
        let _ = web_sys::Url::revoke_object_url(url);
    }
}

/// Output bytes plus the URL they are published under
#[derive(Debug)]
pub struct Artifact {
    pub url: String,
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Single-slot artifact holder
#[derive(Debug, Default)]
pub struct ArtifactSlot {
    current: Option<Artifact>,
}

impl ArtifactSlot {
    /// Publish new output. The old URL is revoked only after the new one
    /// exists, so a failed publish leaves the previous artifact in place.
    pub fn replace(
        &mut self,
        urls: &mut impl UrlRegistry,
        bytes: Vec<u8>,
        file_name: &str,
    ) -> Result<&Artifact, String> {
        let url = urls.create(&bytes, "application/pdf")?;
        if let Some(old) = self.current.take() {
            urls.revoke(&old.url);
        }
        Ok(self.current.insert(Artifact {
            url,
            file_name: file_name.to_string(),
            bytes,
        }))
    }

    pub fn clear(&mut self, urls: &mut impl UrlRegistry) {
        if let Some(old) = self.current.take() {
            urls.revoke(&old.url);
        }
    }

    pub fn current(&self) -> Option<&Artifact> {
        self.current.as_ref()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// In-memory registry that tracks live URLs
    #[derive(Debug, Default)]
    pub struct FakeUrls {
        pub next: u32,
        pub live: Vec<String>,
        pub revoked: Vec<String>,
        pub fail: bool,
    }

    impl UrlRegistry for FakeUrls {
        fn create(&mut self, _bytes: &[u8], _mime: &str) -> Result<String, String> {
            if self.fail {
                return Err("quota exceeded".into());
            }
            self.next += 1;
            let url = format!("blob:test/{}", self.next);
            self.live.push(url.clone());
            Ok(url)
        }

        fn revoke(&mut self, url: &str) {
            self.live.retain(|u| u != url);
            self.revoked.push(url.to_string());
        }
    }

    #[test]
    fn test_replace_revokes_previous() {
        let mut urls = FakeUrls::default();
        let mut slot = ArtifactSlot::default();

        slot.replace(&mut urls, vec![1], "a.pdf").unwrap();
        slot.replace(&mut urls, vec![2], "b.pdf").unwrap();

        assert_eq!(urls.live, vec!["blob:test/2"]);
        assert_eq!(urls.revoked, vec!["blob:test/1"]);
        assert_eq!(slot.current().unwrap().file_name, "b.pdf");
    }

    #[test]
    fn test_clear_revokes_and_empties() {
        let mut urls = FakeUrls::default();
        let mut slot = ArtifactSlot::default();
        slot.replace(&mut urls, vec![1], "a.pdf").unwrap();

        slot.clear(&mut urls);
        assert!(slot.current().is_none());
        assert!(urls.live.is_empty());

        // Clearing an empty slot is a no-op
        slot.clear(&mut urls);
        assert_eq!(urls.revoked.len(), 1);
    }

    #[test]
    fn test_failed_publish_keeps_previous() {
        let mut urls = FakeUrls::default();
        let mut slot = ArtifactSlot::default();
        slot.replace(&mut urls, vec![1], "a.pdf").unwrap();

        urls.fail = true;
        assert!(slot.replace(&mut urls, vec![2], "b.pdf").is_err());
        assert_eq!(slot.current().unwrap().url, "blob:test/1");
        assert!(urls.revoked.is_empty());
    }
}
