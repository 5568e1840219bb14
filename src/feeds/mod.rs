pub mod avito;
pub mod yandex;
