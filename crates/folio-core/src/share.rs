//! Social share links.

use url::Url;

use crate::domain::{BlogSocialShare, SocialPlatform};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareTarget {
    pub platform: SocialPlatform,
    pub label: &'static str,
    /// Intent URL to open, or the page URL itself for `copy`.
    pub href: String,
}

/// Share targets for a page, in the configured platform order.
pub fn share_targets(share: &BlogSocialShare, page_url: &str, title: &str) -> Vec<ShareTarget> {
    if !share.enabled || share.platforms.is_empty() {
        return Vec::new();
    }

    share
        .platforms
        .iter()
        .filter_map(|&platform| match share_href(platform, page_url, title) {
            Ok(href) => Some(ShareTarget {
                platform,
                label: platform.label(),
                href,
            }),
            Err(e) => {
                tracing::warn!(platform = platform.label(), error = %e, "Failed to build share link");
                None
            }
        })
        .collect()
}

fn share_href(
    platform: SocialPlatform,
    page_url: &str,
    title: &str,
) -> Result<String, url::ParseError> {
    let url = match platform {
        SocialPlatform::Twitter => Url::parse_with_params(
            "https://twitter.com/intent/tweet",
            &[("url", page_url), ("text", title)],
        )?,
        SocialPlatform::Facebook => Url::parse_with_params(
            "https://www.facebook.com/sharer/sharer.php",
            &[("u", page_url)],
        )?,
        SocialPlatform::Linkedin => Url::parse_with_params(
            "https://www.linkedin.com/sharing/share-offsite/",
            &[("url", page_url)],
        )?,
        SocialPlatform::Reddit => Url::parse_with_params(
            "https://reddit.com/submit",
            &[("url", page_url), ("title", title)],
        )?,
        SocialPlatform::Copy => return Ok(page_url.to_string()),
    };

    Ok(url.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn share(platforms: Vec<SocialPlatform>) -> BlogSocialShare {
        BlogSocialShare {
            enabled: true,
            platforms,
        }
    }

    #[test]
    fn test_links_encode_url_and_title() {
        let targets = share_targets(
            &share(vec![SocialPlatform::Twitter, SocialPlatform::Copy]),
            "https://blog.dev/blog/a?b=c",
            "Hello & bye",
        );

        assert_eq!(targets.len(), 2);
        assert_eq!(
            targets[0].href,
            "https://twitter.com/intent/tweet?url=https%3A%2F%2Fblog.dev%2Fblog%2Fa%3Fb%3Dc&text=Hello+%26+bye"
        );
        assert_eq!(targets[1].href, "https://blog.dev/blog/a?b=c");
        assert_eq!(targets[1].label, "Copy Link");
    }

    #[test]
    fn test_facebook_uses_u_param() {
        let targets = share_targets(&share(vec![SocialPlatform::Facebook]), "https://x.io", "");
        assert_eq!(
            targets[0].href,
            "https://www.facebook.com/sharer/sharer.php?u=https%3A%2F%2Fx.io"
        );
    }

    #[test]
    fn test_disabled_or_empty_yields_nothing() {
        let mut disabled = share(vec![SocialPlatform::Reddit]);
        disabled.enabled = false;
        assert!(share_targets(&disabled, "https://x.io", "t").is_empty());
        assert!(share_targets(&share(Vec::new()), "https://x.io", "t").is_empty());
    }
}
