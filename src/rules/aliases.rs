/// Common and trade names that labels use instead of the INCI binomial.
///
/// Keys are matched after normalization, values are looked up in the
/// dictionary index as-is (after normalization). The table is curated
/// independently of any dictionary snapshot.
pub(crate) const COMMON_ALIASES: &[(&str, &str)] = &[
    ("evening primrose oil", "oenothera biennis oil"),
    ("rosehip oil", "rosa canina fruit oil"),
    ("argan oil", "argania spinosa kernel oil"),
    ("marula oil", "sclerocarya birrea seed oil"),
    ("tamanu oil", "calophyllum inophyllum seed oil"),
    ("jojoba oil", "simmondsia chinensis seed oil"),
    ("sunflower seed oil", "helianthus annuus seed oil"),
    ("sweet almond oil", "prunus amygdalus dulcis oil"),
    ("olive oil", "olea europaea fruit oil"),
    ("grapeseed oil", "vitis vinifera seed oil"),
    ("pomegranate seed oil", "punica granatum seed oil"),
    ("cranberry seed oil", "vaccinium macrocarpon seed oil"),
    ("raspberry seed oil", "rubus idaeus seed oil"),
    ("blackcurrant seed oil", "ribes nigrum seed oil"),
    ("borage seed oil", "borago officinalis seed oil"),
    ("evening primrose", "oenothera biennis oil"),
    ("rubus idaeus raspberry seed oil", "rubus idaeus seed oil"),
    ("vaccinium macrocarpon cranberry seed oil", "vaccinium macrocarpon seed oil"),
    ("punica granatum pomegranate seed oil", "punica granatum seed oil"),
];
