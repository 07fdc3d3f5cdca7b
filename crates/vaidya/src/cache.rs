/// Redis caching layer for machine translations.
///
/// All operations degrade gracefully: a miss or a failed write only costs another call to
/// the translation service.
///
/// Key schema:
/// - `vaidya:v1:translation:{locale}:{sha256(text)}`: translated string (TTL 7 days)
use sha2::{Digest, Sha256};

use crate::locale::Locale;
use vaidya_common::redis::RedisCache;

const KEY_PREFIX: &str = "vaidya:v1:";
const TRANSLATION_TTL_SECS: u64 = 7 * 24 * 3600;

pub struct TranslationCache {
    redis: RedisCache,
}

impl TranslationCache {
    pub fn new(redis: RedisCache) -> Self {
        Self { redis }
    }

    pub async fn get_translation(&self, target: Locale, text: &str) -> Option<String> {
        self.redis.get(&translation_key(target, text)).await
    }

    pub async fn set_translation(&self, target: Locale, text: &str, translated: &str) {
        self.redis
            .set_with_ttl(&translation_key(target, text), translated, TRANSLATION_TTL_SECS)
            .await;
    }
}

fn translation_key(target: Locale, text: &str) -> String {
    let hash = Sha256::digest(text.as_bytes());
    format!("{KEY_PREFIX}translation:{}:{:x}", target.code(), hash)
}
