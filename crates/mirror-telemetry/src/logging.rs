//! Structured logging helpers.
//!
//! Every event carries a `subsystem` field (`sm-01`, `sm-02`, ...) so JSON
//! output can be filtered per component.

/// Log an info event tagged with its subsystem.
#[macro_export]
macro_rules! log_event {
    (info, $subsystem:expr, $msg:expr $(, $($field:tt)*)?) => {
        tracing::info!(
            subsystem = $subsystem,
            $($($field)*,)?
            $msg
        )
    };
}

/// Log a block-related event with standard fields.
#[macro_export]
macro_rules! log_block_event {
    ($level:ident, $subsystem:expr, $msg:expr, $block_height:expr, $block_hash:expr $(, $($field:tt)*)?) => {
        tracing::$level!(
            subsystem = $subsystem,
            block_height = $block_height,
            block_hash = %$block_hash,
            $($($field)*,)?
            $msg
        )
    };
}

/// Log an agent-related event with standard fields.
#[macro_export]
macro_rules! log_agent_event {
    ($level:ident, $subsystem:expr, $msg:expr, $agent_id:expr $(, $($field:tt)*)?) => {
        tracing::$level!(
            subsystem = $subsystem,
            agent_id = %$agent_id,
            $($($field)*,)?
            $msg
        )
    };
}
