mod mistral;

pub use mistral::MistralLlm;
