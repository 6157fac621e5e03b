// Motor de agregação: filtro por período, join com as dimensões e soma por grupo.
// Tudo em memória, sem efeitos colaterais.
pub mod aggregate;
pub mod filter;
pub mod join;
