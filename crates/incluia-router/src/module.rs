//! Application modules and their engine policies.
//!
//! Each AI feature area of the school system is one [`Module`]. The
//! descriptor says which engine the module uses by default, which engines a
//! user may explicitly pick, and whether the module degrades to the fallback
//! slot when its engine is unavailable. Descriptors are compiled in — they
//! are product policy, not runtime configuration.

use std::fmt::Display;

use incluia_core::engine::Engine;

/// A logical AI feature area of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Module {
    /// Generation of the PEI document itself.
    Pei,
    /// Generation of the PAEE service plan.
    Paee,
    /// OCR / interpretation of diagnostic reports from images.
    DiagnosticoVisao,
    /// Adaptation of classroom activities.
    Adaptacao,
    /// Free-form assistant chat for teachers.
    Hub,
}

/// Engine policy of one module.
#[derive(Debug, Clone, Copy)]
pub struct ModuleDescriptor {
    pub default_engine: Engine,
    pub allowed_engines: &'static [Engine],
    pub fallback_enabled: bool,
}

impl ModuleDescriptor {
    pub fn allows(&self, engine: Engine) -> bool {
        self.allowed_engines.contains(&engine)
    }
}

impl Module {
    pub const ALL: [Module; 5] = [
        Module::Pei,
        Module::Paee,
        Module::DiagnosticoVisao,
        Module::Adaptacao,
        Module::Hub,
    ];

    pub fn descriptor(&self) -> ModuleDescriptor {
        match self {
            Module::Pei => ModuleDescriptor {
                default_engine: Engine::Red,
                allowed_engines: &[Engine::Red, Engine::Orange, Engine::Purple, Engine::Green],
                fallback_enabled: true,
            },
            Module::Paee => ModuleDescriptor {
                default_engine: Engine::Red,
                allowed_engines: &[Engine::Red],
                fallback_enabled: true,
            },
            Module::DiagnosticoVisao => ModuleDescriptor {
                default_engine: Engine::Blue,
                allowed_engines: &[Engine::Blue, Engine::Green],
                fallback_enabled: true,
            },
            Module::Adaptacao => ModuleDescriptor {
                default_engine: Engine::Red,
                allowed_engines: &[Engine::Red, Engine::Orange],
                fallback_enabled: true,
            },
            Module::Hub => ModuleDescriptor {
                default_engine: Engine::Red,
                allowed_engines: &[Engine::Red, Engine::Orange, Engine::Purple, Engine::Green],
                fallback_enabled: true,
            },
        }
    }

    /// Stable tag used in logs and route parameters.
    pub fn as_str(&self) -> &'static str {
        match self {
            Module::Pei => "pei",
            Module::Paee => "paee",
            Module::DiagnosticoVisao => "diagnostico-visao",
            Module::Adaptacao => "adaptacao",
            Module::Hub => "hub",
        }
    }
}

impl Display for Module {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_default_engine_is_in_its_own_allow_list() {
        for module in Module::ALL {
            let descriptor = module.descriptor();
            assert!(
                descriptor.allows(descriptor.default_engine),
                "{module} default engine missing from allow-list"
            );
        }
    }

    #[test]
    fn only_vision_module_defaults_to_a_vision_engine() {
        assert_eq!(
            Module::DiagnosticoVisao.descriptor().default_engine,
            Engine::Blue
        );
        for module in [Module::Pei, Module::Paee, Module::Adaptacao, Module::Hub] {
            assert_eq!(module.descriptor().default_engine, Engine::FALLBACK);
        }
    }
}
