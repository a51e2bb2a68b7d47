//! Art-Net protocol encoding.
//!
//! Only the ArtDMX operation is produced. The header is written once, from a
//! compile-time template, when a [`Packet`] is created; afterwards only the
//! sequence byte (stamped by the client) and the DMX payload change. Byte
//! offsets live in `layout`, payload validation errors in `error`.
//!
//! Version française (résumé):
//! Le module encode uniquement ArtDMX. L'en-tête est écrit une fois à la
//! création du paquet; seuls l'octet de séquence et les données DMX changent
//! ensuite. Les positions sont dans `layout`.

pub mod error;
pub mod layout;
pub mod packet;

pub use error::ArtNetError;
pub use packet::Packet;
