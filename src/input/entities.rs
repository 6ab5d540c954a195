//! Named character entities recognised in `&name;` escapes.

/// Sorted by byte order of the name for binary search.
pub static ENTITIES: &[(&str, u32)] = &[
    ("AElig", 0x00c6),
    ("Aacute", 0x00c1),
    ("Abreve", 0x0102),
    ("Acirc", 0x00c2),
    ("Agrave", 0x00c0),
    ("Amacr", 0x0100),
    ("Aogon", 0x0104),
    ("Aring", 0x00c5),
    ("Atilde", 0x00c3),
    ("Auml", 0x00c4),
    ("Cacute", 0x0106),
    ("Ccaron", 0x010c),
    ("Ccedil", 0x00c7),
    ("Ccirc", 0x0108),
    ("Cdot", 0x010a),
    ("Dagger", 0x2021),
    ("Dcaron", 0x010e),
    ("Dstrok", 0x0110),
    ("ENG", 0x014a),
    ("ETH", 0x00d0),
    ("Eacute", 0x00c9),
    ("Ecaron", 0x011a),
    ("Ecirc", 0x00ca),
    ("Edot", 0x0116),
    ("Egrave", 0x00c8),
    ("Emacr", 0x0112),
    ("Eogon", 0x0118),
    ("Euml", 0x00cb),
    ("Euro", 0x20ac),
    ("Gbreve", 0x011e),
    ("Gcedil", 0x0122),
    ("Gcirc", 0x011c),
    ("Gdot", 0x0120),
    ("Hcirc", 0x0124),
    ("Hstrok", 0x0126),
    ("IJlig", 0x0132),
    ("Iacute", 0x00cd),
    ("Icirc", 0x00ce),
    ("Idot", 0x0130),
    ("Igrave", 0x00cc),
    ("Imacr", 0x012a),
    ("Iogon", 0x012e),
    ("Itilde", 0x0128),
    ("Iuml", 0x00cf),
    ("Jcirc", 0x0134),
    ("Kcedil", 0x0136),
    ("Lacute", 0x0139),
    ("Lcaron", 0x013d),
    ("Lcedil", 0x013b),
    ("Lmidot", 0x013f),
    ("Lstrok", 0x0141),
    ("Nacute", 0x0143),
    ("Ncaron", 0x0147),
    ("Ncedil", 0x0145),
    ("Ntilde", 0x00d1),
    ("OElig", 0x0152),
    ("Oacute", 0x00d3),
    ("Ocirc", 0x00d4),
    ("Odblac", 0x0150),
    ("Ograve", 0x00d2),
    ("Omacr", 0x014c),
    ("Oslash", 0x00d8),
    ("Otilde", 0x00d5),
    ("Ouml", 0x00d6),
    ("Racute", 0x0154),
    ("Rcaron", 0x0158),
    ("Rcedil", 0x0156),
    ("Sacute", 0x015a),
    ("Scaron", 0x0160),
    ("Scedil", 0x015e),
    ("Scirc", 0x015c),
    ("THORN", 0x00de),
    ("Tcaron", 0x0164),
    ("Tcedil", 0x0162),
    ("Tstrok", 0x0166),
    ("Uacute", 0x00da),
    ("Ubreve", 0x016c),
    ("Ucirc", 0x00db),
    ("Udblac", 0x0170),
    ("Ugrave", 0x00d9),
    ("Umacr", 0x016a),
    ("Uogon", 0x0172),
    ("Uring", 0x016e),
    ("Utilde", 0x0168),
    ("Uuml", 0x00dc),
    ("Wcirc", 0x0174),
    ("Yacute", 0x00dd),
    ("Ycirc", 0x0176),
    ("Yuml", 0x0178),
    ("Zacute", 0x0179),
    ("Zcaron", 0x017d),
    ("Zdot", 0x017b),
    ("aacute", 0x00e1),
    ("abreve", 0x0103),
    ("acirc", 0x00e2),
    ("aelig", 0x00e6),
    ("agrave", 0x00e0),
    ("amacr", 0x0101),
    ("amp", 0x0026),
    ("aogon", 0x0105),
    ("aring", 0x00e5),
    ("atilde", 0x00e3),
    ("auml", 0x00e4),
    ("blank", 0x2423),
    ("blk12", 0x2592),
    ("blk14", 0x2591),
    ("blk34", 0x2593),
    ("block", 0x2588),
    ("brvbar", 0x00a6),
    ("bull", 0x2022),
    ("cacute", 0x0107),
    ("caret", 0x2041),
    ("ccaron", 0x010d),
    ("ccedil", 0x00e7),
    ("ccirc", 0x0109),
    ("cdot", 0x010b),
    ("cent", 0x00a2),
    ("check", 0x2713),
    ("cir", 0x25cb),
    ("clubs", 0x2663),
    ("copy", 0x00a9),
    ("copysr", 0x2117),
    ("cross", 0x2717),
    ("curren", 0x00a4),
    ("dagger", 0x2020),
    ("darr", 0x2193),
    ("dash", 0x2010),
    ("dcaron", 0x010f),
    ("deg", 0x00b0),
    ("diams", 0x2666),
    ("divide", 0x00f7),
    ("dlcrop", 0x230d),
    ("drcrop", 0x230c),
    ("dstrok", 0x0111),
    ("dtri", 0x25bf),
    ("dtrif", 0x25be),
    ("eacute", 0x00e9),
    ("ecaron", 0x011b),
    ("ecirc", 0x00ea),
    ("edot", 0x0117),
    ("egrave", 0x00e8),
    ("emacr", 0x0113),
    ("eng", 0x014b),
    ("eogon", 0x0119),
    ("eth", 0x00f0),
    ("euml", 0x00eb),
    ("female", 0x2640),
    ("ffilig", 0xfb03),
    ("fflig", 0xfb00),
    ("ffllig", 0xfb04),
    ("filig", 0xfb01),
    ("flat", 0x266d),
    ("fllig", 0xfb02),
    ("frac12", 0x00bd),
    ("frac13", 0x2153),
    ("frac14", 0x00bc),
    ("frac15", 0x2155),
    ("frac16", 0x2159),
    ("frac18", 0x215b),
    ("frac23", 0x2154),
    ("frac25", 0x2156),
    ("frac34", 0x00be),
    ("frac35", 0x2157),
    ("frac38", 0x215c),
    ("frac45", 0x2158),
    ("frac56", 0x215a),
    ("frac58", 0x215d),
    ("frac78", 0x215e),
    ("gacute", 0x01f5),
    ("gbreve", 0x011f),
    ("gcirc", 0x011d),
    ("gdot", 0x0121),
    ("gt", 0x003e),
    ("half", 0x00bd),
    ("hcirc", 0x0125),
    ("hearts", 0x2665),
    ("hellip", 0x2026),
    ("horbar", 0x2015),
    ("hstrok", 0x0127),
    ("hybull", 0x2043),
    ("iacute", 0x00ed),
    ("icirc", 0x00ee),
    ("iexcl", 0x00a1),
    ("igrave", 0x00ec),
    ("ijlig", 0x0133),
    ("imacr", 0x012b),
    ("incare", 0x2105),
    ("inodot", 0x0131),
    ("iogon", 0x012f),
    ("iquest", 0x00bf),
    ("itilde", 0x0129),
    ("iuml", 0x00ef),
    ("jcirc", 0x0135),
    ("kcedil", 0x0137),
    ("kgreen", 0x0138),
    ("lacute", 0x013a),
    ("laquo", 0x00ab),
    ("larr", 0x2190),
    ("lcaron", 0x013e),
    ("lcedil", 0x013c),
    ("ldquo", 0x201c),
    ("ldquor", 0x201e),
    ("lhblk", 0x2584),
    ("lmidot", 0x0140),
    ("loz", 0x25ca),
    ("lsquo", 0x2018),
    ("lsquor", 0x201a),
    ("lstrok", 0x0142),
    ("lt", 0x003c),
    ("ltri", 0x25c3),
    ("ltrif", 0x25c2),
    ("male", 0x2642),
    ("malt", 0x2720),
    ("marker", 0x25ae),
    ("mdash", 0x2014),
    ("micro", 0x00b5),
    ("middot", 0x00b7),
    ("mldr", 0x2026),
    ("nacute", 0x0144),
    ("napos", 0x0149),
    ("natur", 0x266e),
    ("nbsp", 0x00a0),
    ("ncaron", 0x0148),
    ("ncedil", 0x0146),
    ("ndash", 0x2013),
    ("nldr", 0x2025),
    ("not", 0x00ac),
    ("ntilde", 0x00f1),
    ("oacute", 0x00f3),
    ("ocirc", 0x00f4),
    ("odblac", 0x0151),
    ("oelig", 0x0153),
    ("ograve", 0x00f2),
    ("ohm", 0x2126),
    ("omacr", 0x014d),
    ("ordf", 0x00aa),
    ("ordm", 0x00ba),
    ("oslash", 0x00f8),
    ("otilde", 0x00f5),
    ("ouml", 0x00f6),
    ("para", 0x00b6),
    ("phone", 0x260e),
    ("plusmn", 0x00b1),
    ("pound", 0x00a3),
    ("racute", 0x0155),
    ("raquo", 0x00bb),
    ("rarr", 0x2192),
    ("rcaron", 0x0159),
    ("rcedil", 0x0157),
    ("rdquo", 0x201d),
    ("rdquor", 0x201d),
    ("rect", 0x25ad),
    ("reg", 0x00ae),
    ("rsquo", 0x2019),
    ("rsquor", 0x2019),
    ("rtri", 0x25b9),
    ("rtrif", 0x25b8),
    ("rx", 0x211e),
    ("sacute", 0x015b),
    ("scaron", 0x0161),
    ("scedil", 0x015f),
    ("scirc", 0x015d),
    ("sect", 0x00a7),
    ("sext", 0x2736),
    ("sharp", 0x266f),
    ("shy", 0x00ad),
    ("spades", 0x2660),
    ("squ", 0x25a1),
    ("squf", 0x25aa),
    ("sup1", 0x00b9),
    ("sup2", 0x00b2),
    ("sup3", 0x00b3),
    ("szlig", 0x00df),
    ("target", 0x2316),
    ("tcaron", 0x0165),
    ("tcedil", 0x0163),
    ("telrec", 0x2315),
    ("thorn", 0x00fe),
    ("times", 0x00d7),
    ("trade", 0x2122),
    ("tstrok", 0x0167),
    ("uacute", 0x00fa),
    ("uarr", 0x2191),
    ("ubreve", 0x016d),
    ("ucirc", 0x00fb),
    ("udblac", 0x0171),
    ("ugrave", 0x00f9),
    ("uhblk", 0x2580),
    ("ulcrop", 0x230f),
    ("umacr", 0x016b),
    ("uogon", 0x0173),
    ("urcrop", 0x230e),
    ("uring", 0x016f),
    ("utilde", 0x0169),
    ("utri", 0x25b5),
    ("utrif", 0x25b4),
    ("uuml", 0x00fc),
    ("vellip", 0x22ee),
    ("wcirc", 0x0175),
    ("yacute", 0x00fd),
    ("ycirc", 0x0177),
    ("yen", 0x00a5),
    ("yuml", 0x00ff),
    ("zacute", 0x017a),
    ("zcaron", 0x017e),
    ("zdot", 0x017c),
];

/// Look up a named entity.
pub fn lookup(name: &str) -> Option<u32> {
    ENTITIES
        .binary_search_by(|(n, _)| n.cmp(&name))
        .ok()
        .map(|i| ENTITIES[i].1)
}
