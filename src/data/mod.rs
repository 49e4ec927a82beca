/// Data layer: sources, core types, and normalization.
///
/// Architecture:
/// ```text
///   remote HTML page          local .csv file
///        │                          │
///        ▼                          ▼
///   ┌──────────┐             ┌────────────┐
///   │   html    │            │ delimited  │   RowSource → Vec<RawRow>
///   └──────────┘             └────────────┘
///        └────────────┬─────────────┘
///                     ▼
///              ┌────────────┐
///              │ normalize  │   RawRow → Record, bad rows dropped
///              └────────────┘
///                     │
///                     ▼
///                  Series         ordered, handed to a renderer
/// ```

pub mod delimited;
pub mod fetch;
pub mod html;
pub mod model;
pub mod normalize;
pub mod source;
