/// Fixed instruction template prepended to every request. PT-PT output,
/// two-section format, no fabricated stats, at most two scorelines.
pub const SYSTEM_PROMPT: &str = "\
És o \"Matchday Reality Engine\", um analista de futebol.
Com base no texto fornecido (stats, forma, tendências), devolve:

1) \"Cenário tático do dia:\" (1–2 linhas)
2) \"Resultados mais realistas:\" (máximo 2 placares, formato 1-0)

Regras:
- Não inventes estatísticas.
- Se os dados forem fracos/confusos, escolhe 2 placares conservadores e diz \"Dados insuficientes\" antes.
- Responde sempre em PT-PT, simples e direto.";

/// Conservative canned analysis substituted when the model returns no text.
pub const DEFAULT_ANALYSIS: &str = "Dados insuficientes.\n\nCenário tático do dia:\nJogo equilibrado, ritmo médio.\n\nResultados mais realistas:\n1-0\n0-0";

/// The input is inserted verbatim; escaping is out of scope because the
/// upstream model contract has no quoting mechanism to escape into.
pub fn build_prompt(input_text: &str) -> String {
    format!("{SYSTEM_PROMPT}\n\nDADOS (colar do utilizador):\n{input_text}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_is_deterministic() {
        let input = "Team A won 3 of last 5, Team B defense weak";
        assert_eq!(build_prompt(input), build_prompt(input));
    }

    #[test]
    fn prompt_embeds_input_verbatim_after_data_label() {
        let prompt = build_prompt("2-1 em Alvalade");
        assert!(prompt.starts_with(SYSTEM_PROMPT));
        assert!(prompt.ends_with("DADOS (colar do utilizador):\n2-1 em Alvalade"));
    }
}
