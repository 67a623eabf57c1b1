macro_rules! const_color {
    ($name:ident, $value:expr) => {
        paste::paste! {
            pub const $name: u32 = $value;

            pub fn [<$name:lower>]() -> poise::serenity_prelude::Colour {
                poise::serenity_prelude::Colour::new($name)
            }
        }
    };
}

const_color! { GREEN,  0x10611B }
const_color! { ORANGE, 0xFF6347 }
const_color! { RED,    0xA20000 }
const_color! { SLATE,  0x3E6775 }
