//! Target commands, registered on top of the base `q`/`quit` entries.
//!
//! | command   | args            | effect                                         |
//! |-----------|-----------------|------------------------------------------------|
//! | `showcpu` |                 | show the CPU status panel                      |
//! | `hidecpu` |                 | hide the CPU status panel                      |
//! | `load`    | filename        | copy the file into memory at 0, PC = 0         |
//! | `step`    |                 | execute one instruction                        |
//! | `write`   | address value   | store one byte                                 |
//! | `pc`      | address         | move the program counter and show it           |
//! | `update`  | address         | move the memory listing's base address         |

use std::fs::File;
use std::io::Read;

use vizzium_core::{
    parse_address, parse_byte, CommandError, CommandRegistry, CommandResult, Target,
};

use crate::context::DebugContext;

/// Add the target commands to `registry`, replacing same-named entries.
pub fn register_target_commands<T: Target + 'static>(
    registry: &mut CommandRegistry<DebugContext<T>>,
) {
    registry.register("showcpu", show_cpu_panel::<T>);
    registry.register("hidecpu", hide_cpu_panel::<T>);
    registry.register("load", load_binary::<T>);
    registry.register("step", execute_step::<T>);
    registry.register("write", write_memory::<T>);
    registry.register("pc", set_pc::<T>);
    registry.register("update", update_memory::<T>);
}

fn arg<'a>(tokens: &'a [String], index: usize, what: &'static str) -> Result<&'a str, CommandError> {
    tokens
        .get(index)
        .map(String::as_str)
        .ok_or(CommandError::MissingArgument(what))
}

fn show_cpu_panel<T: Target>(ctx: &mut DebugContext<T>, _tokens: &[String]) -> CommandResult {
    ctx.screen.panels.status = true;
    ctx.refresh_status();
    Ok(())
}

fn hide_cpu_panel<T: Target>(ctx: &mut DebugContext<T>, _tokens: &[String]) -> CommandResult {
    ctx.screen.panels.status = false;
    Ok(())
}

fn load_binary<T: Target>(ctx: &mut DebugContext<T>, tokens: &[String]) -> CommandResult {
    let path = arg(tokens, 1, "filename")?;
    let unavailable = |source| CommandError::ResourceUnavailable {
        path: path.to_string(),
        source,
    };

    let capacity = ctx.target.memory_size().min(usize::from(u16::MAX) + 1);
    let file = File::open(path).map_err(unavailable)?;

    // One byte past capacity tells an exact fit from a truncated image.
    let mut image = Vec::with_capacity(capacity + 1);
    file.take(capacity as u64 + 1)
        .read_to_end(&mut image)
        .map_err(unavailable)?;

    if image.len() > capacity {
        tracing::warn!(path = %path, capacity, "Image larger than target memory, truncating");
        image.truncate(capacity);
    }

    for (address, byte) in image.iter().enumerate() {
        ctx.target.write(address as u16, *byte);
    }
    ctx.target.set_program_counter(0);

    tracing::info!(path = %path, bytes = image.len(), "Loaded target image");

    ctx.view.render_memory_from(&ctx.target, &mut ctx.screen, 0);
    ctx.refresh_status();
    Ok(())
}

fn execute_step<T: Target>(ctx: &mut DebugContext<T>, _tokens: &[String]) -> CommandResult {
    ctx.target.step();
    ctx.refresh_status();
    ctx.refresh_memory();
    Ok(())
}

fn write_memory<T: Target>(ctx: &mut DebugContext<T>, tokens: &[String]) -> CommandResult {
    let address = parse_address(arg(tokens, 1, "address")?, "address")?;
    let value = parse_byte(arg(tokens, 2, "value")?, "value")?;

    ctx.target.write(address, value);
    ctx.refresh_memory();
    Ok(())
}

fn set_pc<T: Target>(ctx: &mut DebugContext<T>, tokens: &[String]) -> CommandResult {
    let address = parse_address(arg(tokens, 1, "address")?, "address")?;

    ctx.target.set_program_counter(address);
    ctx.view.render_memory_from(&ctx.target, &mut ctx.screen, address);
    ctx.refresh_status();
    Ok(())
}

fn update_memory<T: Target>(ctx: &mut DebugContext<T>, tokens: &[String]) -> CommandResult {
    let address = parse_address(arg(tokens, 1, "address")?, "address")?;

    ctx.view.set_base_address(address);
    ctx.refresh_memory();
    Ok(())
}
