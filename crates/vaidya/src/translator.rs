/// Translation adapter: maps display strings into the requested locale.
///
/// `translate` always returns a string. Any failure (service unset, network, quota,
/// malformed reply) yields the source text unchanged, so callers never branch on
/// translation outcomes.
use std::collections::HashMap;
use std::sync::Arc;

use futures::future::join_all;
use tracing::{debug, warn};

use crate::cache::TranslationCache;
use crate::locale::Locale;
use vaidya_common::redis::RedisCache;
use vaidya_common::translate::TranslateClient;

pub struct TranslationAdapter {
    client: Option<TranslateClient>,
    cache: Arc<TranslationCache>,
}

impl TranslationAdapter {
    pub fn new(client: Option<TranslateClient>, cache: Arc<TranslationCache>) -> Self {
        Self { client, cache }
    }

    /// An adapter that never calls out and returns every input unchanged.
    pub fn disabled() -> Self {
        Self::new(None, Arc::new(TranslationCache::new(RedisCache::disabled())))
    }

    pub fn is_enabled(&self) -> bool {
        self.client.is_some()
    }

    pub async fn translate(&self, text: &str, target: Locale) -> String {
        if !target.needs_translation() || text.trim().is_empty() {
            return text.to_string();
        }
        let Some(client) = &self.client else {
            return text.to_string();
        };

        if let Some(cached) = self.cache.get_translation(target, text).await {
            debug!(locale = %target, "translation cache hit");
            return cached;
        }

        match client
            .translate(text, Locale::SOURCE.code(), target.code())
            .await
        {
            Ok(translated) => {
                self.cache.set_translation(target, text, &translated).await;
                translated
            }
            Err(e) => {
                warn!(error = %e, locale = %target, "translation failed, using source text");
                text.to_string()
            }
        }
    }

    /// Translate several fields concurrently. Output order matches `texts`; repeated
    /// strings are translated once.
    pub async fn translate_all(&self, texts: &[&str], target: Locale) -> Vec<String> {
        if !target.needs_translation() || self.client.is_none() {
            return texts.iter().map(|t| t.to_string()).collect();
        }

        let mut unique: Vec<&str> = Vec::new();
        let mut slots: HashMap<&str, usize> = HashMap::new();
        for &text in texts {
            slots.entry(text).or_insert_with(|| {
                unique.push(text);
                unique.len() - 1
            });
        }

        let translated = join_all(unique.iter().map(|text| self.translate(text, target))).await;
        texts
            .iter()
            .map(|text| translated[slots[text]].clone())
            .collect()
    }
}
