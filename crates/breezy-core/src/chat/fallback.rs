//! Canned replies for offline mode.
//!
//! When the model server has failed too many times in a row the session
//! answers from a fixed list of six templates instead. Selection goes
//! through [`RandomSource`] so tests can pin the choice.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use breezy_types::chat::Prompt;

/// Number of canned templates.
pub const TEMPLATE_COUNT: usize = 6;

/// Index of the template that quotes the prompt back.
pub const ECHO_TEMPLATE: usize = 3;

/// Source of uniform indices for template selection.
pub trait RandomSource: Send {
    /// Return an index in `0..len`. `len` is never zero.
    fn pick(&mut self, len: usize) -> usize;
}

/// Entropy-seeded [`RandomSource`] used in production.
pub struct StdRandom(StdRng);

impl StdRandom {
    pub fn from_entropy() -> Self {
        Self(StdRng::from_entropy())
    }

    #[cfg(test)]
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl RandomSource for StdRandom {
    fn pick(&mut self, len: usize) -> usize {
        self.0.gen_range(0..len)
    }
}

/// Picks one canned reply per prompt.
pub struct FallbackResponder<R> {
    rng: R,
}

impl<R: RandomSource> FallbackResponder<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Choose a canned reply for `prompt`.
    pub fn respond(&mut self, prompt: &Prompt) -> String {
        let index = self.rng.pick(TEMPLATE_COUNT).min(TEMPLATE_COUNT - 1);
        render_template(index, prompt)
    }
}

/// Render template `index` (0-based) for `prompt`.
///
/// Out-of-range indices are clamped to the last template.
pub fn render_template(index: usize, prompt: &Prompt) -> String {
    match index {
        0 => "Desculpe, estou com dificuldades para me conectar com o modelo LLM neste momento."
            .to_string(),
        1 => "Olá! Sou uma resposta simulada pois estamos com problemas na conexão com a API."
            .to_string(),
        2 => "A API está indisponível no momento. Por favor, tente novamente mais tarde."
            .to_string(),
        ECHO_TEMPLATE => format!(
            "Recebi sua mensagem: \"{}\", mas a modelo LLM está fora do ar agora.",
            prompt.as_str()
        ),
        4 => "Estou funcionando no modo offline. Minhas respostas são limitadas.".to_string(),
        _ => "Por favor, verifique sua conexão com a internet e tente novamente.".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    /// Replays a fixed list of indices.
    struct Sequence(Vec<usize>);

    impl RandomSource for Sequence {
        fn pick(&mut self, _len: usize) -> usize {
            self.0.remove(0)
        }
    }

    fn prompt(text: &str) -> Prompt {
        Prompt::new(text).unwrap()
    }

    #[test]
    fn test_echo_template_quotes_prompt_verbatim() {
        let mut responder = FallbackResponder::new(Sequence(vec![ECHO_TEMPLATE]));
        let reply = responder.respond(&prompt("qual a previsão do tempo?"));
        assert_eq!(
            reply,
            "Recebi sua mensagem: \"qual a previsão do tempo?\", mas a modelo LLM está fora do ar agora."
        );
    }

    #[test]
    fn test_templates_are_distinct_and_only_one_quotes_prompt() {
        let p = prompt("zebra-42");
        let rendered: Vec<String> = (0..TEMPLATE_COUNT).map(|i| render_template(i, &p)).collect();

        let unique: HashSet<&String> = rendered.iter().collect();
        assert_eq!(unique.len(), TEMPLATE_COUNT);

        let quoting: Vec<usize> = rendered
            .iter()
            .enumerate()
            .filter(|(_, r)| r.contains("zebra-42"))
            .map(|(i, _)| i)
            .collect();
        assert_eq!(quoting, vec![ECHO_TEMPLATE]);
    }

    #[test]
    fn test_selection_follows_random_source() {
        let p = prompt("oi");
        let mut responder = FallbackResponder::new(Sequence(vec![0, 5, 2]));
        assert_eq!(responder.respond(&p), render_template(0, &p));
        assert_eq!(responder.respond(&p), render_template(5, &p));
        assert_eq!(responder.respond(&p), render_template(2, &p));
    }

    #[test]
    fn test_out_of_range_pick_is_clamped() {
        let p = prompt("oi");
        let mut responder = FallbackResponder::new(Sequence(vec![99]));
        assert_eq!(responder.respond(&p), render_template(TEMPLATE_COUNT - 1, &p));
    }

    #[test]
    fn test_std_random_stays_in_range_and_covers_templates() {
        let p = prompt("oi");
        let all: HashSet<String> = (0..TEMPLATE_COUNT).map(|i| render_template(i, &p)).collect();

        let mut responder = FallbackResponder::new(StdRandom::seeded(7));
        let mut seen = HashSet::new();
        for _ in 0..500 {
            let reply = responder.respond(&p);
            assert!(all.contains(&reply));
            seen.insert(reply);
        }
        assert_eq!(seen.len(), TEMPLATE_COUNT);
    }
}
