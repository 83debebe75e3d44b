//! Decoding parameters for completion calls

/// Parameters for a single completion call.
///
/// Each pipeline stage pins its own values (drafting runs warmer than
/// judging), so this is plain data rather than provider configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationParams {
    /// Sampling temperature (0.0 = deterministic)
    pub temperature: f32,
    /// Maximum number of tokens to generate
    pub max_tokens: u32,
}

impl GenerationParams {
    pub fn new(temperature: f32, max_tokens: u32) -> Self {
        Self {
            temperature,
            max_tokens,
        }
    }
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            temperature: 0.2,
            max_tokens: 512,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let params = GenerationParams::new(0.0, 256);
        assert_eq!(params.temperature, 0.0);
        assert_eq!(params.max_tokens, 256);
    }

    #[test]
    fn test_default() {
        let params = GenerationParams::default();
        assert_eq!(params.temperature, 0.2);
        assert_eq!(params.max_tokens, 512);
    }
}
