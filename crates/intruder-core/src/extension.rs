//! Extension registration.
//!
//! The host loads the extension once, hands it an [`ExtenderCallbacks`]
//! implementation and gets back a named [`GeneratorFactory`]. Each attack
//! then asks the factory for a fresh [`PayloadGenerator`].

use std::collections::BTreeMap;

use tracing::{debug, info};

use crate::codec::CodecKind;
use crate::config::{ExtensionConfig, TextMode};
use crate::error::{IntruderError, IntruderResult};
use crate::generator::{AttackContext, PayloadGenerator};
use crate::strategy::ByteWalk;

/// Builds one generator per attack. Factories hold no attack state.
pub trait GeneratorFactory: Send + Sync {
    /// Label shown in the host UI.
    fn generator_name(&self) -> &str;

    fn create_new_instance(&self, attack: &AttackContext) -> PayloadGenerator;
}

/// Host side of the registration handshake.
pub trait ExtenderCallbacks {
    fn set_extension_name(&mut self, name: &str);

    fn register_payload_generator_factory(
        &mut self,
        factory: Box<dyn GeneratorFactory>,
    ) -> IntruderResult<()>;
}

/// Factory for [`ByteWalk`] generators.
#[derive(Debug, Clone)]
pub struct ByteWalkFactory {
    name: String,
    codec: CodecKind,
    text_mode: TextMode,
}

impl ByteWalkFactory {
    pub fn new(name: impl Into<String>, codec: CodecKind, text_mode: TextMode) -> Self {
        Self {
            name: name.into(),
            codec,
            text_mode,
        }
    }

    pub fn from_config(config: &ExtensionConfig) -> Self {
        Self::new(&config.generator_name, config.codec, config.text_mode)
    }
}

impl GeneratorFactory for ByteWalkFactory {
    fn generator_name(&self) -> &str {
        &self.name
    }

    fn create_new_instance(&self, attack: &AttackContext) -> PayloadGenerator {
        debug!(
            generator = %self.name,
            codec = %self.codec,
            host = %attack.service.host,
            port = attack.service.port,
            "creating payload generator"
        );
        let strategy = ByteWalk::with_codec(self.codec.build());
        PayloadGenerator::new(Box::new(strategy), attack.clone(), self.text_mode)
    }
}

/// Entry point called by the host at load time.
pub struct Extension;

impl Extension {
    /// Name the extension and register its generator factory.
    pub fn register(
        callbacks: &mut dyn ExtenderCallbacks,
        config: &ExtensionConfig,
    ) -> IntruderResult<()> {
        config.validate()?;
        // Host state is only touched once the factory is accepted.
        callbacks
            .register_payload_generator_factory(Box::new(ByteWalkFactory::from_config(config)))?;
        callbacks.set_extension_name(&config.extension_name);
        info!(extension = %config.extension_name, "{}", config.load_message);
        Ok(())
    }
}

/// In-process host: keeps registered factories by name.
#[derive(Default)]
pub struct HostRegistry {
    extension_name: Option<String>,
    factories: BTreeMap<String, Box<dyn GeneratorFactory>>,
}

impl HostRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn extension_name(&self) -> Option<&str> {
        self.extension_name.as_deref()
    }

    pub fn generator_names(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }

    pub fn factory(&self, name: &str) -> Option<&dyn GeneratorFactory> {
        self.factories.get(name).map(|f| &**f)
    }

    /// Start an attack with the named generator.
    pub fn create_generator(
        &self,
        name: &str,
        attack: &AttackContext,
    ) -> IntruderResult<PayloadGenerator> {
        self.factory(name)
            .map(|f| f.create_new_instance(attack))
            .ok_or_else(|| IntruderError::config(format!("no generator registered as {:?}", name)))
    }
}

impl ExtenderCallbacks for HostRegistry {
    fn set_extension_name(&mut self, name: &str) {
        self.extension_name = Some(name.to_string());
    }

    fn register_payload_generator_factory(
        &mut self,
        factory: Box<dyn GeneratorFactory>,
    ) -> IntruderResult<()> {
        let name = factory.generator_name().to_string();
        if self.factories.contains_key(&name) {
            return Err(IntruderError::config(format!(
                "generator {:?} already registered",
                name
            )));
        }
        self.factories.insert(name, factory);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::HttpService;

    fn attack() -> AttackContext {
        AttackContext::new(b"POST / HTTP/1.1\r\n\r\n".to_vec(), HttpService::new("h", 80, "http"))
    }

    #[test]
    fn test_register_names_extension_and_factory() {
        let mut host = HostRegistry::new();
        Extension::register(&mut host, &ExtensionConfig::default()).unwrap();
        assert_eq!(host.extension_name(), Some("My Extension"));
        assert_eq!(host.generator_names().collect::<Vec<_>>(), vec!["My Generator"]);
    }

    #[test]
    fn test_register_twice_is_rejected() {
        let mut host = HostRegistry::new();
        let cfg = ExtensionConfig::default();
        Extension::register(&mut host, &cfg).unwrap();

        let mut second = cfg.clone();
        second.extension_name = "Second".to_string();
        assert!(matches!(
            Extension::register(&mut host, &second),
            Err(IntruderError::Config { .. })
        ));
        assert_eq!(host.extension_name(), Some("My Extension"));
        assert_eq!(host.generator_names().count(), 1);
    }

    #[test]
    fn test_register_rejects_invalid_config() {
        let mut host = HostRegistry::new();
        let cfg = ExtensionConfig::default().with_generator_name("");
        assert!(Extension::register(&mut host, &cfg).is_err());
        assert!(host.extension_name().is_none());
    }

    #[test]
    fn test_instances_are_independent() {
        let mut host = HostRegistry::new();
        Extension::register(&mut host, &ExtensionConfig::default()).unwrap();

        let mut first = host.create_generator("My Generator", &attack()).unwrap();
        let mut second = host.create_generator("My Generator", &attack()).unwrap();
        first.next_payload(b"QQ").unwrap();
        assert_eq!(first.next_payload(b"QQ").unwrap(), b"Qw");
        assert_eq!(second.next_payload(b"QQ").unwrap(), b"Qg");
    }

    #[test]
    fn test_unknown_generator() {
        let host = HostRegistry::new();
        assert!(host.create_generator("nope", &attack()).is_err());
    }

    #[test]
    fn test_identity_factory() {
        let factory = ByteWalkFactory::new("raw", CodecKind::Identity, TextMode::Bytes);
        let mut generator = factory.create_new_instance(&attack());
        assert_eq!(generator.next_payload(b"a").unwrap(), b"b");
    }
}
