use std::{error::Error, io, io::Write};

use termproto::{
    ExpandContext, NumberCap, Parameter, SequenceKind, StringCap, TermInfoDesc, padding,
    sequences,
};

fn main() -> Result<(), Box<dyn Error>> {
    let desc = TermInfoDesc::load_from_env()?;
    println!("Terminal: {}", desc.names().join(" | "));
    if let Some(colors) = desc.get_number(NumberCap::MaxColors) {
        println!("Colors: {colors}");
    }

    let Some(cap) = desc.string_capability(StringCap::CursorAddress) else {
        println!("Your terminal cannot address the cursor");
        return Ok(());
    };
    println!("Template elements:");
    for info in cap.parameters()? {
        println!("  {:>3} {:<6} {:?}", info.position, info.representation, info.kind);
    }

    let mut context = ExpandContext::new();
    let mut stdout = io::stdout();
    let mut drawn = Vec::new();
    for (row, col) in [(2, 10), (3, 12), (4, 14)] {
        let params = [Parameter::from(row), Parameter::from(col)];
        if let Some(sequence) = cap.expand(&mut context, &params)? {
            padding::write(&mut drawn, &sequence)?;
            drawn.extend(format!("row {row}, column {col}").into_bytes());
        }
    }
    stdout.write_all(&drawn)?;
    stdout.flush()?;

    let text = String::from_utf8_lossy(&drawn);
    println!(
        "\nVisible text: {:?}",
        sequences::strip(&text, SequenceKind::all())
    );
    Ok(())
}
